//! InsightDeck error types

use thiserror::Error;

/// InsightDeck error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing credential, unusable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Classification provider error
    #[error("Classification error: {0}")]
    Classification(String),

    /// Insight id collision on creation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for InsightDeck operations
pub type Result<T> = std::result::Result<T, Error>;
