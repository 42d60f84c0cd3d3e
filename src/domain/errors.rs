//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Network error, timeout, non-2xx or empty reply from the text model.
    #[error("upstream model call failed: {0}")]
    Upstream(String),

    /// The model answered, but not with JSON of the expected shape.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    /// Boundary error of both generators. Upstream and malformed-output causes
    /// collapse into this one kind; the message keeps the cause.
    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to transcribe audio: {0}")]
    Transcription(String),
}
