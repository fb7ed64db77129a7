// ── Core error types ──
//
// The layout engine itself never fails: malformed graphs degrade into
// smaller (possibly empty) layouts. These errors only cover decoding the
// JSON documents handed to the engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid graph document: {message}")]
    InvalidGraph { message: String },

    #[error("Invalid device metadata: {message}")]
    InvalidMetadata { message: String },
}

impl CoreError {
    pub(crate) fn graph(err: &serde_json::Error) -> Self {
        Self::InvalidGraph {
            message: err.to_string(),
        }
    }

    pub(crate) fn metadata(err: &serde_json::Error) -> Self {
        Self::InvalidMetadata {
            message: err.to_string(),
        }
    }
}
