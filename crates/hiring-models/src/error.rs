//! Model parsing errors.

use thiserror::Error;

/// Errors raised when parsing model enums from strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Unknown job status: {0}")]
    UnknownJobStatus(String),

    #[error("Unknown candidate status: {0}")]
    UnknownCandidateStatus(String),
}
