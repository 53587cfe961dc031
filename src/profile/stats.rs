// Mon Oct 19 2026 - Alex

use crate::memory::{Address, MemoryMap};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::ops::AddAssign;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub inuse_objects: u64,
    pub inuse_bytes: u64,
    pub alloc_objects: u64,
    pub alloc_bytes: u64,
}

impl Stats {
    pub fn new(inuse_objects: u64, inuse_bytes: u64, alloc_objects: u64, alloc_bytes: u64) -> Self {
        Self {
            inuse_objects,
            inuse_bytes,
            alloc_objects,
            alloc_bytes,
        }
    }

    /// Pointwise sum. Counters saturate at `u64::MAX`.
    pub fn add(&mut self, other: &Stats) {
        self.inuse_objects = self.inuse_objects.saturating_add(other.inuse_objects);
        self.inuse_bytes = self.inuse_bytes.saturating_add(other.inuse_bytes);
        self.alloc_objects = self.alloc_objects.saturating_add(other.alloc_objects);
        self.alloc_bytes = self.alloc_bytes.saturating_add(other.alloc_bytes);
    }
}

impl AddAssign<&Stats> for Stats {
    fn add_assign(&mut self, rhs: &Stats) {
        self.add(rhs);
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}: {}]",
            self.inuse_objects, self.inuse_bytes, self.alloc_objects, self.alloc_bytes
        )
    }
}

/// One allocation site: stats plus return addresses, innermost frame first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    pub stats: Stats,
    pub addresses: Vec<Address>,
}

impl Stack {
    pub fn new(stats: Stats, addresses: Vec<Address>) -> Self {
        Self { stats, addresses }
    }

    pub fn innermost(&self) -> Option<Address> {
        self.addresses.first().copied()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}",
            self.stats,
            self.addresses.iter().map(|a| a.to_string()).join(" ")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub header: Stats,
    pub stacks: Vec<Stack>,
    pub maps: MemoryMap,
}

impl Profile {
    pub fn new(header: Stats) -> Self {
        Self {
            header,
            stacks: Vec::new(),
            maps: MemoryMap::new(),
        }
    }

    pub fn total_inuse_bytes(&self) -> u64 {
        self.header.inuse_bytes
    }

    /// Writes the profile back out in the text format it was parsed from.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "heap profile: {} @", self.header)?;
        for stack in &self.stacks {
            writeln!(writer, "{}", stack)?;
        }
        writeln!(writer, "MAPPED_LIBRARIES:")?;
        for entry in self.maps.iter() {
            writeln!(writer, "{}", entry)?;
        }
        Ok(())
    }
}
