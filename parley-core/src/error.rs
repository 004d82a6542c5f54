//! Error types for parley-core.

use thiserror::Error;

/// Result type alias using parley-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Parley operations
#[derive(Error, Debug)]
pub enum Error {
    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    // Input validation errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Missing entity errors
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    // Upstream completion errors
    #[error("Completion endpoint unavailable: {0}")]
    UpstreamUnavailable(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error refers to a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FolderNotFound(_) | Self::SessionNotFound(_))
    }
}
