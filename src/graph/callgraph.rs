// Mon Oct 19 2026 - Alex

use crate::graph::{EdgeKey, Node};
use crate::memory::Address;
use crate::profile::Stack;
use ahash::AHashMap;

#[derive(Clone, Debug, Default)]
pub struct CallGraph {
    nodes: AHashMap<Address, Node>,
    edges: AHashMap<EdgeKey, u64>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(stacks: &[Stack], names: &AHashMap<Address, String>) -> Self {
        let mut graph = Self::new();
        for stack in stacks {
            graph.add_stack(stack, names);
        }
        graph
    }

    /// Folds one stack into the graph, walking innermost frame first.
    pub fn add_stack(&mut self, stack: &Stack, names: &AHashMap<Address, String>) {
        let mut last: Option<Address> = None;

        for &addr in &stack.addresses {
            if last == Some(addr) {
                continue;
            }

            let node = self
                .nodes
                .entry(addr)
                .or_insert_with(|| Node::new(addr, String::new()));
            if let Some(name) = names.get(&addr) {
                node.set_name_if_empty(name);
            }

            match last {
                None => node.cur.add(&stack.stats),
                Some(prev) => {
                    let weight = self.edges.entry(EdgeKey::new(addr, prev)).or_insert(0);
                    *weight = weight.saturating_add(stack.stats.inuse_bytes);
                }
            }
            node.cum.add(&stack.stats);

            last = Some(addr);
        }
    }

    pub fn get_node(&self, address: Address) -> Option<&Node> {
        self.nodes.get(&address)
    }

    pub fn edge_weight(&self, src: Address, dst: Address) -> Option<u64> {
        self.edges.get(&EdgeKey::new(src, dst)).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, u64)> + '_ {
        self.edges.iter().map(|(k, w)| (*k, *w))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Positive cumulative in-use sizes, largest first.
    pub fn node_sizes(&self) -> Vec<u64> {
        let mut sizes: Vec<u64> = self
            .nodes
            .values()
            .map(|n| n.cum.inuse_bytes)
            .filter(|&size| size > 0)
            .collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }
}
