//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Reportable**: Every variant renders to the message string carried by
//!   an error reply

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Dispatch | `UnknownOperation` | Unrecognized message type |
/// | Validation | `InvalidInput` | Malformed payload |
/// | Worker | `QueueFull`, `WorkerStopped` | Worker thread unavailable |
/// | System | `Io`, `Serialization`, `Internal` | Infrastructure errors |
///
/// # Example
///
/// ```
/// use loupe_executor::{Command, Error};
/// use serde_json::Value;
///
/// match Command::from_request("bogus", Value::Null) {
///     Err(Error::UnknownOperation { operation }) => assert_eq!(operation, "bogus"),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Dispatch ====================
    /// Message type is not a known operation
    #[error("Unknown operation: {operation}")]
    UnknownOperation {
        /// Operation name as received
        operation: String,
    },

    // ==================== Validation ====================
    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    // ==================== Worker ====================
    /// Worker queue is at capacity
    #[error("worker queue is full")]
    QueueFull,

    /// Worker thread has shut down
    #[error("worker has stopped")]
    WorkerStopped,

    // ==================== System Errors ====================
    /// I/O error
    #[error("I/O error: {reason}")]
    Io {
        /// Underlying I/O error message
        reason: String,
    },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization {
        /// Encoder or decoder message
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Description of the violated invariant
        reason: String,
    },
}

impl From<loupe_core::Error> for Error {
    fn from(e: loupe_core::Error) -> Self {
        match e {
            loupe_core::Error::InvalidDocument(reason) => Error::InvalidInput {
                reason: format!("invalid document: {}", reason),
            },
            loupe_core::Error::Serialization(reason) => Error::Serialization { reason },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io {
            reason: e.to_string(),
        }
    }
}
