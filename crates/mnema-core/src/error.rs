//! Error types for mnema.

use thiserror::Error;

/// Result type alias using mnema's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for mnema operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Word not found
    #[error("Word not found: {0}")]
    WordNotFound(uuid::Uuid),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Every candidate in an ingestion batch already exists
    #[error("All {} submitted words already exist", .skipped.len())]
    AllDuplicates { skipped: Vec<String> },

    /// Unknown sort-type token
    #[error("Unsupported sort type '{got}'. Valid types: {valid}")]
    UnsupportedSortType { got: String, valid: String },

    /// Pagination parameters out of range
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Model output could not be parsed into enrichment records
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
