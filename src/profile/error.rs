// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {reason}: '{text}'")]
    Format {
        line: usize,
        text: String,
        reason: String,
    },
    #[error("empty profile")]
    Empty,
}

impl ProfileError {
    pub fn format(line: usize, text: &str, reason: impl Into<String>) -> Self {
        ProfileError::Format {
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
