// Mon Oct 19 2026 - Alex

use crate::memory::Address;
use std::fmt;

/// Directed edge from a calling frame to the frame it called, i.e. from the
/// later frame to the earlier one in an innermost-first stack walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    src: Address,
    dst: Address,
}

impl EdgeKey {
    pub fn new(src: Address, dst: Address) -> Self {
        Self { src, dst }
    }

    pub fn src(&self) -> Address {
        self.src
    }

    pub fn dst(&self) -> Address {
        self.dst
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}
