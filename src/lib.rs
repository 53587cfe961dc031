// Mon Oct 19 2026 - Alex

pub mod config;
pub mod graph;
pub mod memory;
pub mod pipeline;
pub mod profile;
pub mod symbol;
pub mod utils;

pub use config::{Config, DemanglerKind};
pub use graph::{CallGraph, DotWriter, GraphPruner, RenderSet};
pub use pipeline::{Pipeline, PipelineOutput, PipelineReport};
pub use profile::Profile;
pub use symbol::{SymbolSource, SymbolTable};
