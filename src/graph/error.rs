// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status:?}: {stderr}")]
    RasterizerFailed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
