// Mon Oct 19 2026 - Alex

use crate::graph::{CallGraph, RenderError, RenderSet};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_inuse_bytes: u64,
    pub keep_threshold: u64,
    pub shown_nodes: usize,
    pub shown_edges: usize,
    pub shown_bytes: u64,
    pub missing_bytes: u64,
    /// Positive cumulative sizes of every node, largest first.
    pub node_sizes: Vec<u64>,
}

impl GraphStats {
    pub fn from_graph(graph: &CallGraph, set: &RenderSet, total_inuse_bytes: u64) -> Self {
        Self {
            node_count: graph.len(),
            edge_count: graph.edge_count(),
            total_inuse_bytes,
            keep_threshold: set.threshold,
            shown_nodes: set.nodes.len(),
            shown_edges: set.edges.len(),
            shown_bytes: set.shown_bytes,
            missing_bytes: set.missing_bytes,
            node_sizes: graph.node_sizes(),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<(), RenderError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
