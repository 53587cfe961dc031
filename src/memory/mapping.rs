// Mon Oct 19 2026 - Alex

use crate::memory::Address;
use std::fmt;

/// One loaded module from the profile's `MAPPED_LIBRARIES:` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    start: Address,
    end: Address,
    path: String,
}

impl MapEntry {
    pub fn new(start: Address, end: Address, path: String) -> Self {
        Self { start, end, path }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    /// Exclusive.
    pub fn end(&self) -> Address {
        self.end
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.is_within_range(self.start, self.end)
    }
}

impl fmt::Display for MapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}-{:x} r-xp 00000000 00:00 0", self.start, self.end)?;
        if !self.path.is_empty() {
            write!(f, " {}", self.path)?;
        }
        Ok(())
    }
}

/// Loaded-module map, kept sorted by end address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryMap {
    entries: Vec<MapEntry>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(mut entries: Vec<MapEntry>) -> Self {
        entries.sort_by_key(|e| e.end);
        Self { entries }
    }

    pub fn search(&self, addr: Address) -> Option<&MapEntry> {
        let idx = self.entries.partition_point(|e| e.end <= addr);
        self.entries.get(idx).filter(|e| e.start <= addr)
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
