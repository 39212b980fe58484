//! Error types for the forest core

use thiserror::Error;

/// Why a follower name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name must be at least {min} characters")]
    TooShort { min: usize },

    #[error("This follower name already exists")]
    Duplicate,
}

/// Main error type for the forest core
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid follower name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Follower index {index} out of range (len {len})")]
    FollowerIndex { index: usize, len: usize },

    #[error("Invalid chapter table: {0}")]
    InvalidChapters(String),

    #[error("Import rejected: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
