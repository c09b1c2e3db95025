//! Error types for the loupe document model
//!
//! This module defines the errors raised while turning caller-supplied
//! payloads into typed documents.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for loupe core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the loupe document model
#[derive(Debug, Error)]
pub enum Error {
    /// The payload cannot be interpreted as a document
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
