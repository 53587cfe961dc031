// Mon Oct 19 2026 - Alex

use crate::memory::Address;
use crate::profile::Stats;
use std::fmt;

/// A call-graph vertex. `cur` holds stats of stacks that end here, `cum`
/// holds stats of every stack passing through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    address: Address,
    name: String,
    pub cur: Stats,
    pub cum: Stats,
}

impl Node {
    pub fn new(address: Address, name: String) -> Self {
        Self {
            address,
            name,
            cur: Stats::default(),
            cum: Stats::default(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn set_name_if_empty(&mut self, name: &str) {
        if self.name.is_empty() {
            self.name = name.to_string();
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_name() {
            write!(f, "{} @ {}", self.name, self.address)
        } else {
            write!(f, "{}", self.address)
        }
    }
}
