// Mon Oct 19 2026 - Alex

pub mod address;
pub mod mapping;

pub use address::Address;
pub use mapping::{MapEntry, MemoryMap};
