//! Error types for korean-learner-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the grader, scheduler and session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("card not found: {0}")]
    CardNotFound(i64),

    #[error("review session has no cards left")]
    SessionFinished,
}

/// Errors that can occur while loading seed content.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("malformed seed content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing front text for card {id}")]
    MissingFront { id: i64 },

    #[error("missing back text for card {id}")]
    MissingBack { id: i64 },

    #[error("duplicate ID {id} at position {position}")]
    DuplicateId { id: i64, position: usize },
}
