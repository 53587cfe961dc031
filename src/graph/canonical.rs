// Mon Oct 19 2026 - Alex

use crate::memory::Address;
use crate::profile::Stack;
use crate::symbol::SymbolTable;
use ahash::AHashMap;
use log::debug;

/// Collapses every address that resolves to the same symbol onto one
/// representative address, so each function becomes a single node.
#[derive(Debug, Default)]
pub struct StackCanonicalizer {
    by_name: AHashMap<String, Address>,
    names: AHashMap<Address, String>,
    rewritten: usize,
    unresolved: usize,
}

impl StackCanonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canonicalize(&mut self, stacks: &mut [Stack], symbols: &SymbolTable) {
        for stack in stacks.iter_mut() {
            self.canonicalize_stack(stack, symbols);
        }
        debug!(
            "canonicalized {} stacks: {} symbols, {} frames rewritten, {} unresolved",
            stacks.len(),
            self.by_name.len(),
            self.rewritten,
            self.unresolved
        );
    }

    pub fn canonicalize_stack(&mut self, stack: &mut Stack, symbols: &SymbolTable) {
        let mut frames = Vec::with_capacity(stack.addresses.len());
        let mut last: Option<Address> = None;

        for &addr in &stack.addresses {
            let addr = self.canonical_address(addr, symbols);
            if last == Some(addr) {
                continue;
            }
            frames.push(addr);
            last = Some(addr);
        }

        stack.addresses = frames;
    }

    fn canonical_address(&mut self, addr: Address, symbols: &SymbolTable) -> Address {
        let symbol = match symbols.lookup(addr) {
            Some(symbol) => symbol,
            None => {
                self.unresolved += 1;
                return addr;
            }
        };

        let canonical = match self.by_name.get(symbol.name()) {
            Some(&canonical) => canonical,
            None => {
                self.by_name.insert(symbol.name().to_string(), addr);
                addr
            }
        };
        if canonical != addr {
            self.rewritten += 1;
        }
        self.names
            .entry(canonical)
            .or_insert_with(|| symbol.name().to_string());
        canonical
    }

    pub fn canonical_for(&self, name: &str) -> Option<Address> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, addr: Address) -> Option<&str> {
        self.names.get(&addr).map(String::as_str)
    }

    pub fn into_names(self) -> AHashMap<Address, String> {
        self.names
    }

    pub fn symbol_count(&self) -> usize {
        self.by_name.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Stats;
    use crate::symbol::Symbol;

    fn table(entries: &[(u64, u64, &str)]) -> SymbolTable {
        SymbolTable::from_symbols(
            entries
                .iter()
                .map(|&(addr, size, name)| Symbol::new(Address::new(addr), size, name.to_string()))
                .collect(),
        )
    }

    fn stack(addrs: &[u64]) -> Stack {
        Stack::new(
            Stats::new(1, 16, 1, 16),
            addrs.iter().map(|&a| Address::new(a)).collect(),
        )
    }

    fn addrs(stack: &Stack) -> Vec<u64> {
        stack.addresses.iter().map(|a| a.as_u64()).collect()
    }

    #[test]
    fn test_same_symbol_collapses_to_one_frame() {
        let symbols = table(&[(0x10, 0x20, "f")]);
        let mut stacks = vec![stack(&[0x10, 0x20, 0x10])];

        let mut canonicalizer = StackCanonicalizer::new();
        canonicalizer.canonicalize(&mut stacks, &symbols);

        assert_eq!(addrs(&stacks[0]), vec![0x10]);
        assert_eq!(canonicalizer.name_of(Address::new(0x10)), Some("f"));
        assert_eq!(canonicalizer.canonical_for("f"), Some(Address::new(0x10)));
    }

    #[test]
    fn test_first_seen_address_is_canonical_across_stacks() {
        let symbols = table(&[(0x100, 0x100, "alloc"), (0x200, 0x100, "main")]);
        let mut stacks = vec![stack(&[0x150, 0x210]), stack(&[0x120, 0x2f0])];

        let mut canonicalizer = StackCanonicalizer::new();
        canonicalizer.canonicalize(&mut stacks, &symbols);

        assert_eq!(addrs(&stacks[0]), vec![0x150, 0x210]);
        assert_eq!(addrs(&stacks[1]), vec![0x150, 0x210]);

        let names = canonicalizer.into_names();
        assert_eq!(names.len(), 2);
        assert_eq!(names[&Address::new(0x210)], "main");
    }

    #[test]
    fn test_unresolved_addresses_pass_through() {
        let symbols = table(&[(0x100, 0x10, "f")]);
        let mut stacks = vec![stack(&[0x5000, 0x5000, 0x104, 0x6000])];

        let mut canonicalizer = StackCanonicalizer::new();
        canonicalizer.canonicalize(&mut stacks, &symbols);

        assert_eq!(addrs(&stacks[0]), vec![0x5000, 0x104, 0x6000]);
        assert!(canonicalizer.name_of(Address::new(0x5000)).is_none());
        assert_eq!(canonicalizer.name_of(Address::new(0x104)), Some("f"));
    }

    #[test]
    fn test_non_adjacent_repeats_are_kept() {
        let symbols = table(&[(0x100, 0x10, "f"), (0x200, 0x10, "g")]);
        let mut stacks = vec![stack(&[0x100, 0x200, 0x108])];

        StackCanonicalizer::new().canonicalize(&mut stacks, &symbols);

        assert_eq!(addrs(&stacks[0]), vec![0x100, 0x200, 0x100]);
    }
}
