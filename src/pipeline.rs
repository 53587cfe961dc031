// Mon Oct 19 2026 - Alex

use crate::config::Config;
use crate::graph::{
    CallGraph, DotWriter, GraphPruner, GraphStats, NodeLabeler, RenderSet, StackCanonicalizer,
};
use crate::profile::{load_profile, Profile};
use crate::symbol::{create_demangler, SymbolSource, SymbolTable};
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Counts gathered while running the pipeline, for the closing summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub stack_count: usize,
    pub symbol_count: usize,
    pub resolved_symbols: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub shown_nodes: usize,
    pub shown_edges: usize,
    pub shown_bytes: u64,
    pub missing_bytes: u64,
    pub total_bytes: u64,
}

/// Everything needed to emit the final diagram.
pub struct PipelineOutput {
    pub graph: CallGraph,
    pub render: RenderSet,
    pub stats: GraphStats,
    pub report: PipelineReport,
    pub dot: String,
}

pub struct Pipeline {
    config: Config,
    profile_path: PathBuf,
    symbols: SymbolSource,
}

impl Pipeline {
    pub fn new(config: Config, profile_path: PathBuf, symbols: SymbolSource) -> Self {
        Self {
            config,
            profile_path,
            symbols,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the profile and the symbols side by side.
    pub fn load_inputs(&self) -> Result<(Profile, SymbolTable)> {
        load_inputs(&self.profile_path, &self.symbols)
    }

    pub fn run(&self) -> Result<PipelineOutput> {
        let (profile, symbols) = self.load_inputs()?;
        run_with(&self.config, profile, &symbols)
    }
}

pub fn load_inputs(profile_path: &Path, symbols: &SymbolSource) -> Result<(Profile, SymbolTable)> {
    let (profile, table) = rayon::join(
        || {
            info!("reading profile from {}", profile_path.display());
            load_profile(profile_path)
                .with_context(|| format!("Failed to read profile {}", profile_path.display()))
        },
        || {
            info!("reading symbols from {}", symbols.path().display());
            symbols
                .load()
                .with_context(|| format!("Failed to load symbols from {}", symbols.path().display()))
        },
    );

    let profile = profile?;
    info!("loaded {} stacks", profile.stacks.len());
    let table = table?;
    info!("loaded {} syms", table.len());
    Ok((profile, table))
}

/// Canonicalizes the profile's stacks against `symbols` and folds them into
/// a call graph.
pub fn analyze(profile: &mut Profile, symbols: &SymbolTable) -> (CallGraph, usize) {
    let mut canonicalizer = StackCanonicalizer::new();
    canonicalizer.canonicalize(&mut profile.stacks, symbols);
    let resolved = canonicalizer.symbol_count();

    let names = canonicalizer.into_names();
    let graph = CallGraph::build(&profile.stacks, &names);
    info!("built graph: {} nodes, {} edges", graph.len(), graph.edge_count());
    (graph, resolved)
}

pub fn run_with(config: &Config, mut profile: Profile, symbols: &SymbolTable) -> Result<PipelineOutput> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let (graph, resolved_symbols) = analyze(&mut profile, symbols);
    let total_bytes = profile.total_inuse_bytes();

    let mut demangler = create_demangler(config);
    let render = {
        let mut labeler = NodeLabeler::new(demangler.as_mut(), &profile.maps, total_bytes);
        GraphPruner::new(config.keep_count, config.min_edge_kb).prune(&graph, &mut labeler)
    };

    info!("writing output...");
    let dot = DotWriter::new().with_title(&config.graph_title).to_dot(&render);
    let stats = GraphStats::from_graph(&graph, &render, total_bytes);

    let report = PipelineReport {
        stack_count: profile.stacks.len(),
        symbol_count: symbols.len(),
        resolved_symbols,
        node_count: graph.len(),
        edge_count: graph.edge_count(),
        shown_nodes: render.nodes.len(),
        shown_edges: render.edges.len(),
        shown_bytes: render.shown_bytes,
        missing_bytes: render.missing_bytes,
        total_bytes,
    };

    Ok(PipelineOutput {
        graph,
        render,
        stats,
        report,
        dot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Address;
    use crate::profile::parse_heap_profile;
    use crate::symbol::Symbol;
    use std::io::Cursor;

    const PROFILE: &str = "heap profile: 5: 1048576 [10: 2097152] @ heapprofile\n\
                           5: 1048576 [10: 2097152] @ 0x1000 0x2000\n\
                           MAPPED_LIBRARIES:\n";

    fn symbols() -> SymbolTable {
        SymbolTable::from_symbols(vec![
            Symbol::new(Address::new(0x1000), 0x10, "_Znwm".to_string()),
            Symbol::new(Address::new(0x2000), 0x10, "main".to_string()),
        ])
    }

    #[test]
    fn test_single_record_end_to_end() {
        let profile = parse_heap_profile(Cursor::new(PROFILE)).unwrap();
        let output = run_with(&Config::default(), profile, &symbols()).unwrap();

        assert_eq!(output.report.stack_count, 1);
        assert_eq!(output.report.node_count, 2);
        assert_eq!(output.report.edge_count, 1);
        assert_eq!(output.report.resolved_symbols, 2);
        assert_eq!(
            output.graph.edge_weight(Address::new(0x2000), Address::new(0x1000)),
            Some(1048576)
        );

        assert!(output.dot.contains("8192 -> 4096 [label=\" 1024.0\"]"));
        assert!(output.dot.contains("4096 [label=\"_Znwm\\n1024k of 1024k (100.0% of total)\""));
        assert!(output.dot.contains("8192 [label=\"main\\n0k of 1024k (100.0% of total)\""));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let profile = parse_heap_profile(Cursor::new(PROFILE)).unwrap();
        let mut config = Config::default();
        config.graph_title = "say \"hi\"".to_string();
        assert!(run_with(&config, profile, &symbols()).is_err());
    }

    #[test]
    fn test_load_inputs_reports_missing_profile() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("syms.map");
        std::fs::write(&map, "1000 10 main\n").unwrap();

        let err = load_inputs(&dir.path().join("absent.heap"), &SymbolSource::MapFile(map))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read profile"));
    }
}
