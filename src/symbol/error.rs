// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Binary parse error: {0}")]
    BinaryParse(String),
    #[error("Unsupported object format: {0}")]
    UnsupportedFormat(String),
    #[error("line {line}: {reason}: '{text}'")]
    Format {
        line: usize,
        text: String,
        reason: String,
    },
}

/// Failure inside a demangler. `position` is the byte offset in the mangled
/// name where decoding stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} (at byte {position})")]
pub struct DemangleError {
    pub reason: String,
    pub position: usize,
}

impl DemangleError {
    pub fn new(reason: impl Into<String>, position: usize) -> Self {
        Self {
            reason: reason.into(),
            position,
        }
    }
}

impl From<std::io::Error> for DemangleError {
    fn from(e: std::io::Error) -> Self {
        DemangleError::new(format!("demangler pipe: {}", e), 0)
    }
}
