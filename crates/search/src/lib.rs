//! Full-text search engine for loupe
//!
//! This crate provides:
//! - Tokenizer shared by indexing and querying
//! - DocumentStore: authoritative id → fields map
//! - InvertedIndex / FieldIndexes: global and per-field token postings
//! - Fuzzy matcher based on Levenshtein distance
//! - QueryEngine: token lookup, scoring by matched-token count, ranking
//! - SearchIndex: the index manager tying all of the above together
//!
//! # Usage
//!
//! ```
//! use loupe_core::Document;
//! use loupe_search::{SearchIndex, SearchOptions};
//! use serde_json::json;
//!
//! let mut index = SearchIndex::new();
//! index.add_document(Document::from_json(json!({"id": "1", "title": "Payment Terms"})).unwrap());
//!
//! let hits = index.search("payment", &SearchOptions::default());
//! assert_eq!(hits[0].id.as_text(), Some("1"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fuzzy;
pub mod index;
pub mod manager;
pub mod query;
pub mod store;
pub mod tokenizer;

// Re-export commonly used types
pub use fuzzy::{fuzzy_match, levenshtein, max_edits, FuzzyMatch};
pub use index::{FieldIndexes, InvertedIndex, PostingSet};
pub use manager::{IndexStats, SearchIndex};
pub use query::{QueryEngine, SearchHit, SearchOptions, SortBy, DEFAULT_LIMIT};
pub use store::{DocumentStore, StoredDocument};
pub use tokenizer::{tokenize, tokenize_unique, MIN_TOKEN_LEN};
