// Mon Oct 19 2026 - Alex

use crate::graph::{CallGraph, EdgeKey, NodeLabeler};
use crate::memory::Address;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use log::info;
use serde::Serialize;

/// Reduces a full call graph to the few hundred nodes and edges worth
/// drawing.
#[derive(Debug, Clone, Copy)]
pub struct GraphPruner {
    keep_count: usize,
    min_edge_kb: u64,
}

/// Which nodes and edges survive pruning, before any labels are produced.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub threshold: u64,
    pub kept_nodes: AHashSet<Address>,
    pub edges: Vec<(EdgeKey, u64)>,
    /// Kept nodes that have at least one kept edge, largest first.
    pub shown: Vec<Address>,
    /// Kept nodes left without any edge.
    pub missing: Vec<Address>,
    pub shown_bytes: u64,
    pub missing_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub address: Address,
    pub label: String,
    pub size_label: String,
    pub cum_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub src: Address,
    pub dst: Address,
    pub weight: u64,
}

impl RenderEdge {
    pub fn kilobytes(&self) -> f64 {
        self.weight as f64 / 1024.0
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderSet {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub threshold: u64,
    pub shown_bytes: u64,
    pub missing_bytes: u64,
}

impl GraphPruner {
    pub fn new(keep_count: usize, min_edge_kb: u64) -> Self {
        Self {
            keep_count,
            min_edge_kb,
        }
    }

    pub fn keep_count(&self) -> usize {
        self.keep_count
    }

    pub fn min_edge_kb(&self) -> u64 {
        self.min_edge_kb
    }

    /// The cumulative size at rank `keep_count`, or 0 when there are not
    /// enough nodes to need a cutoff.
    pub fn keep_threshold(&self, graph: &CallGraph) -> u64 {
        graph
            .node_sizes()
            .get(self.keep_count)
            .copied()
            .unwrap_or(0)
    }

    pub fn select(&self, graph: &CallGraph) -> Selection {
        let threshold = self.keep_threshold(graph);
        let kept_nodes: AHashSet<Address> = graph
            .nodes()
            .filter(|n| n.cum.inuse_bytes >= threshold)
            .map(|n| n.address())
            .collect();
        info!(
            "keeping {} nodes with cumulative >= {}k",
            kept_nodes.len(),
            threshold / 1024
        );

        let candidates = graph
            .edges()
            .filter(|(key, _)| kept_nodes.contains(&key.src()) && kept_nodes.contains(&key.dst()))
            .sorted_unstable_by(|(ka, wa), (kb, wb)| wb.cmp(wa).then(ka.cmp(kb)));

        let mut indegree: AHashMap<Address, usize> = AHashMap::new();
        let mut outdegree: AHashMap<Address, usize> = AHashMap::new();
        let mut edges = Vec::new();

        for (key, weight) in candidates {
            let covered = indegree.get(&key.dst()).copied().unwrap_or(0) > 0;
            if covered && weight / 1024 < self.min_edge_kb {
                continue;
            }
            *outdegree.entry(key.src()).or_insert(0) += 1;
            *indegree.entry(key.dst()).or_insert(0) += 1;
            edges.push((key, weight));
        }

        let mut selection = Selection {
            threshold,
            edges,
            ..Selection::default()
        };

        let ordered = kept_nodes
            .iter()
            .filter_map(|addr| graph.get_node(*addr))
            .sorted_unstable_by(|a, b| {
                b.cum
                    .inuse_bytes
                    .cmp(&a.cum.inuse_bytes)
                    .then(a.address().cmp(&b.address()))
            });

        for node in ordered {
            let addr = node.address();
            let connected = indegree.contains_key(&addr) || outdegree.contains_key(&addr);
            if connected {
                selection.shown_bytes += node.cur.inuse_bytes;
                selection.shown.push(addr);
            } else {
                info!(
                    "no edges for {:x} ({:.1}k)",
                    addr,
                    node.cum.inuse_bytes as f64 / 1024.0
                );
                selection.missing_bytes += node.cum.inuse_bytes;
                selection.missing.push(addr);
            }
        }

        selection.kept_nodes = kept_nodes;
        info!("total not shown: {:.1}k", selection.missing_bytes as f64 / 1024.0);
        info!("total kept nodes: {:.1}k", selection.shown_bytes as f64 / 1024.0);
        selection
    }

    pub fn prune(&self, graph: &CallGraph, labeler: &mut NodeLabeler<'_>) -> RenderSet {
        let selection = self.select(graph);

        let nodes = selection
            .shown
            .iter()
            .filter_map(|addr| graph.get_node(*addr))
            .map(|node| RenderNode {
                address: node.address(),
                label: labeler.name_label(node),
                size_label: labeler.size_label(node),
                cum_bytes: node.cum.inuse_bytes,
            })
            .collect();

        let edges = selection
            .edges
            .iter()
            .map(|(key, weight)| RenderEdge {
                src: key.src(),
                dst: key.dst(),
                weight: *weight,
            })
            .collect();

        RenderSet {
            nodes,
            edges,
            threshold: selection.threshold,
            shown_bytes: selection.shown_bytes,
            missing_bytes: selection.missing_bytes,
        }
    }
}

impl Default for GraphPruner {
    fn default() -> Self {
        Self::new(100, 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryMap;
    use crate::profile::{Stack, Stats};
    use crate::symbol::ItaniumDemangler;

    const KB: u64 = 1024;

    fn stack(bytes: u64, addrs: &[u64]) -> Stack {
        Stack::new(
            Stats::new(1, bytes, 1, bytes),
            addrs.iter().map(|&a| Address::new(a)).collect(),
        )
    }

    fn graph(stacks: &[Stack]) -> CallGraph {
        CallGraph::build(stacks, &AHashMap::new())
    }

    #[test]
    fn test_keep_threshold_admits_rank_and_above() {
        let g = graph(&[stack(300, &[0x1]), stack(200, &[0x2]), stack(100, &[0x3])]);
        let pruner = GraphPruner::new(1, 30);

        assert_eq!(pruner.keep_threshold(&g), 200);
        let selection = pruner.select(&g);
        assert_eq!(selection.kept_nodes.len(), 2);
        assert!(selection.kept_nodes.contains(&Address::new(0x1)));
        assert!(selection.kept_nodes.contains(&Address::new(0x2)));
        assert!(!selection.kept_nodes.contains(&Address::new(0x3)));
    }

    #[test]
    fn test_zero_keep_count_keeps_largest() {
        let g = graph(&[stack(300, &[0x1]), stack(200, &[0x2]), stack(100, &[0x3])]);
        let pruner = GraphPruner::new(0, 30);

        assert_eq!(pruner.keep_threshold(&g), 300);
        let selection = pruner.select(&g);
        assert_eq!(selection.kept_nodes.len(), 1);
        assert!(selection.kept_nodes.contains(&Address::new(0x1)));
    }

    #[test]
    fn test_ties_at_threshold_are_all_kept() {
        let g = graph(&[
            stack(300, &[0x1]),
            stack(200, &[0x2]),
            stack(200, &[0x3]),
            stack(100, &[0x4]),
        ]);
        let selection = GraphPruner::new(1, 30).select(&g);
        assert_eq!(selection.kept_nodes.len(), 3);
    }

    #[test]
    fn test_small_graph_keeps_everything() {
        let g = graph(&[stack(300, &[0x1, 0x2])]);
        let pruner = GraphPruner::new(100, 30);

        assert_eq!(pruner.keep_threshold(&g), 0);
        assert_eq!(pruner.select(&g).kept_nodes.len(), 2);

        let empty = CallGraph::new();
        let selection = pruner.select(&empty);
        assert!(selection.kept_nodes.is_empty());
        assert!(selection.edges.is_empty());
    }

    #[test]
    fn test_first_inbound_edge_survives_threshold() {
        // 0x10 is reached from 0x20 (big) and 0x30 (small); 0x40 only from 0x50 (small).
        let g = graph(&[
            stack(100 * KB, &[0x10, 0x20]),
            stack(KB, &[0x10, 0x30]),
            stack(2 * KB, &[0x40, 0x50]),
        ]);
        let selection = GraphPruner::new(100, 30).select(&g);

        let kept: Vec<(u64, u64)> = selection
            .edges
            .iter()
            .map(|(k, _)| (k.src().as_u64(), k.dst().as_u64()))
            .collect();
        assert_eq!(kept, vec![(0x20, 0x10), (0x50, 0x40)]);
    }

    #[test]
    fn test_heavy_extra_edges_are_kept() {
        let g = graph(&[stack(100 * KB, &[0x10, 0x20]), stack(40 * KB, &[0x10, 0x30])]);
        let selection = GraphPruner::new(100, 30).select(&g);
        assert_eq!(selection.edges.len(), 2);
        assert_eq!(selection.edges[0].1, 100 * KB);
    }

    #[test]
    fn test_kept_edges_only_touch_kept_nodes() {
        let g = graph(&[
            stack(500 * KB, &[0x1, 0x2, 0x3]),
            stack(50 * KB, &[0x4, 0x5]),
            stack(5 * KB, &[0x6, 0x2]),
        ]);
        let selection = GraphPruner::new(3, 0).select(&g);

        for (key, _) in &selection.edges {
            assert!(selection.kept_nodes.contains(&key.src()));
            assert!(selection.kept_nodes.contains(&key.dst()));
        }
    }

    #[test]
    fn test_roots_stay_roots_after_filtering() {
        let g = graph(&[
            stack(500 * KB, &[0x1, 0x2, 0x3]),
            stack(80 * KB, &[0x1, 0x4, 0x3]),
            stack(10 * KB, &[0x5, 0x2]),
        ]);
        let pruner = GraphPruner::new(100, 30);
        let selection = pruner.select(&g);

        let candidate_roots: Vec<Address> = selection
            .kept_nodes
            .iter()
            .copied()
            .filter(|addr| {
                !g.edges()
                    .any(|(k, _)| k.dst() == *addr && selection.kept_nodes.contains(&k.src()))
            })
            .collect();
        assert!(!candidate_roots.is_empty());
        for root in candidate_roots {
            assert!(selection.edges.iter().all(|(k, _)| k.dst() != root));
        }
    }

    #[test]
    fn test_isolated_nodes_are_reported_missing() {
        let g = graph(&[stack(10 * KB, &[0x1, 0x2]), stack(4 * KB, &[0x3])]);
        let selection = GraphPruner::new(100, 30).select(&g);

        assert_eq!(selection.missing, vec![Address::new(0x3)]);
        assert_eq!(selection.missing_bytes, 4 * KB);
        assert_eq!(selection.shown_bytes, 10 * KB);
        assert_eq!(selection.shown, vec![Address::new(0x1), Address::new(0x2)]);
    }

    #[test]
    fn test_prune_produces_labels() {
        let g = graph(&[stack(2048, &[0x1000, 0x2000])]);
        let mut demangler = ItaniumDemangler::new();
        let maps = MemoryMap::new();
        let mut labeler = NodeLabeler::new(&mut demangler, &maps, 4096);

        let set = GraphPruner::new(100, 30).prune(&g, &mut labeler);

        assert_eq!(set.nodes.len(), 2);
        assert_eq!(set.nodes[0].label, "0x1000");
        assert_eq!(set.nodes[0].size_label, "2k of 2k (50.0% of total)");
        assert_eq!(set.nodes[1].size_label, "0k of 2k (50.0% of total)");
        assert_eq!(set.edges.len(), 1);
        assert_eq!(set.edges[0].src, Address::new(0x2000));
        assert_eq!(set.edges[0].kilobytes(), 2.0);
    }
}
