//! # Loupe Executor
//!
//! The message boundary of the Loupe search engine.
//!
//! This crate provides:
//! - [`Command`]/[`Output`] - Typed operations and their results
//! - [`Executor`] - Owns the index and dispatches commands
//! - [`Request`]/[`Reply`] - The JSON wire protocol
//! - [`SearchWorker`] - Runs the executor on a dedicated thread
//!
//! ## Quick Start
//!
//! ```
//! use loupe_executor::{handle_json, Executor};
//!
//! let mut executor = Executor::new();
//! handle_json(&mut executor, r#"{"id": 1, "type": "addDocument", "data": {"id": "a", "title": "Payment Terms"}}"#);
//!
//! let reply = handle_json(&mut executor, r#"{"id": 2, "type": "search", "data": {"query": "PAYMENT"}}"#);
//! assert!(reply.contains(r#""type":"result""#));
//! ```
//!
//! ## Operations
//!
//! | type | Effect |
//! |------|--------|
//! | `addDocument` | Index or replace one document |
//! | `addDocuments` | Index a batch in order |
//! | `removeDocument` | Drop a document from every index |
//! | `search` | Ranked exact or fuzzy query |
//! | `getStats` | Document, token and field counts |
//! | `clear` | Reset everything |

#![warn(missing_docs)]

mod command;
mod config;
mod error;
mod executor;
mod message;
mod output;
mod worker;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use config::{WorkerConfig, CONFIG_FILE_NAME};
pub use error::Error;
pub use executor::Executor;
pub use message::{handle_json, handle_message, handle_raw, Reply, Request};
pub use output::Output;
pub use worker::SearchWorker;

pub use loupe_core::{DocId, Document, FieldValue, Fields};
pub use loupe_search::{IndexStats, SearchHit, SearchIndex, SearchOptions, SortBy};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
