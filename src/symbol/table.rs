// Mon Oct 19 2026 - Alex

use crate::memory::Address;
use crate::symbol::Symbol;

/// Symbols sorted ascending by start address.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_symbols(mut symbols: Vec<Symbol>) -> Self {
        symbols.sort_by_key(|s| s.address());
        Self { symbols }
    }

    /// Finds the symbol with the greatest start `<= addr` and checks that
    /// `addr` falls inside it. With overlapping input the later-starting
    /// candidate is checked first; if it misses, the lookup misses.
    pub fn lookup(&self, addr: Address) -> Option<&Symbol> {
        let idx = self.symbols.partition_point(|s| s.address() <= addr);
        if idx == 0 {
            return None;
        }
        let candidate = &self.symbols[idx - 1];
        candidate.contains(addr).then_some(candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
