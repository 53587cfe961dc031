// Mon Oct 19 2026 - Alex

pub mod callgraph;
pub mod canonical;
pub mod edge;
pub mod error;
pub mod label;
pub mod node;
pub mod prune;
pub mod stats;
pub mod visualization;

pub use callgraph::CallGraph;
pub use canonical::StackCanonicalizer;
pub use edge::EdgeKey;
pub use error::RenderError;
pub use label::{format_size_label, NodeLabeler};
pub use node::Node;
pub use prune::{GraphPruner, RenderEdge, RenderNode, RenderSet, Selection};
pub use stats::GraphStats;
pub use visualization::{render_png, DotWriter, DEFAULT_RASTERIZER};
