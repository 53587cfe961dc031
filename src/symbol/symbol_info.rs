// Mon Oct 19 2026 - Alex

use crate::memory::Address;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    address: Address,
    size: u64,
    name: String,
}

impl Symbol {
    pub fn new(address: Address, size: u64, name: String) -> Self {
        Self { address, size, name }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn end(&self) -> Address {
        self.address.offset(self.size)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.is_within_range(self.address, self.end())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} (+{})", self.name, self.address, self.size)
    }
}
