// Mon Oct 19 2026 - Alex

pub mod error;
pub mod parser;
pub mod stats;

pub use error::ProfileError;
pub use parser::{parse_heap_profile, ProfileParser};
pub use stats::{Profile, Stack, Stats};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile, ProfileError> {
    let file = File::open(path.as_ref())?;
    parse_heap_profile(BufReader::new(file))
}
