// Mon Oct 19 2026 - Alex

use crate::graph::Node;
use crate::memory::MemoryMap;
use crate::symbol::{strip_type_noise, Demangler};
use log::debug;

/// Turns nodes into display text: a readable name plus a size annotation.
pub struct NodeLabeler<'a> {
    demangler: &'a mut dyn Demangler,
    maps: &'a MemoryMap,
    total_bytes: u64,
}

impl<'a> NodeLabeler<'a> {
    pub fn new(demangler: &'a mut dyn Demangler, maps: &'a MemoryMap, total_bytes: u64) -> Self {
        Self {
            demangler,
            maps,
            total_bytes,
        }
    }

    pub fn name_label(&mut self, node: &Node) -> String {
        if !node.has_name() {
            let mut label = format!("0x{:x}", node.address());
            if let Some(entry) = self.maps.search(node.address()) {
                label.push_str(&format!(" [{}]", entry.path()));
            }
            return label;
        }

        let demangled = match self.demangler.demangle(node.name()) {
            Ok(name) => name,
            Err(e) => {
                debug!("demangling '{}' failed: {}", node.name(), e);
                node.name().to_string()
            }
        };
        strip_type_noise(&demangled)
    }

    pub fn size_label(&self, node: &Node) -> String {
        format_size_label(node.cur.inuse_bytes, node.cum.inuse_bytes, self.total_bytes)
    }
}

pub fn format_size_label(cur: u64, cum: u64, total: u64) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        cum as f64 / total as f64 * 100.0
    };
    format!("{}k of {}k ({:.1}% of total)", cur / 1024, cum / 1024, percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Address, MapEntry};
    use crate::symbol::ItaniumDemangler;

    #[test]
    fn test_size_label_format() {
        assert_eq!(
            format_size_label(1048576, 2097152, 4194304),
            "1024k of 2048k (50.0% of total)"
        );
        assert_eq!(format_size_label(512, 1536, 0), "0k of 1k (0.0% of total)");
    }

    #[test]
    fn test_named_node_is_demangled_and_cleaned() {
        let mut demangler = ItaniumDemangler::new();
        let maps = MemoryMap::new();
        let mut labeler = NodeLabeler::new(&mut demangler, &maps, 0);

        let node = Node::new(Address::new(0x10), "_ZN4base5ValueC2Ev".to_string());
        assert_eq!(labeler.name_label(&node), "base::Value::Value");

        let node = Node::new(Address::new(0x20), "malloc".to_string());
        assert_eq!(labeler.name_label(&node), "malloc");
    }

    #[test]
    fn test_demangle_failure_uses_raw_name() {
        let mut demangler = ItaniumDemangler::new();
        let maps = MemoryMap::new();
        let mut labeler = NodeLabeler::new(&mut demangler, &maps, 0);

        let node = Node::new(Address::new(0x10), "_ZN3fooQE".to_string());
        assert_eq!(labeler.name_label(&node), "_ZN3fooQE");
    }

    #[test]
    fn test_unnamed_node_uses_address_and_module() {
        let mut demangler = ItaniumDemangler::new();
        let maps = MemoryMap::from_entries(vec![MapEntry::new(
            Address::new(0x1000),
            Address::new(0x3000),
            "/bin/x".to_string(),
        )]);
        let mut labeler = NodeLabeler::new(&mut demangler, &maps, 0);

        let node = Node::new(Address::new(0x1234), String::new());
        assert_eq!(labeler.name_label(&node), "0x1234 [/bin/x]");

        let node = Node::new(Address::new(0x9000), String::new());
        assert_eq!(labeler.name_label(&node), "0x9000");
    }
}
