//! Loupe - embedded in-memory full-text search engine
//!
//! Documents are indexed into a global inverted index and per-field indices;
//! queries rank documents by how many distinct query tokens they match, with
//! optional edit-distance (fuzzy) matching.
//!
//! # Quick Start
//!
//! ```
//! use loupe::{Request, SearchWorker, WorkerConfig};
//! use serde_json::json;
//!
//! let (worker, replies) = SearchWorker::spawn(WorkerConfig::default()).unwrap();
//! worker.post(Request::new(1, "addDocument", json!({"id": "c1", "title": "Service contract"}))).unwrap();
//! worker.post(Request::new(2, "search", json!({"query": "contrakt", "options": {"fuzzy": true}}))).unwrap();
//!
//! replies.recv().unwrap();
//! let hits = replies.recv().unwrap();
//! assert_eq!(hits.data().unwrap()[0]["id"], "c1");
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which owns the index. The
//! [`SearchWorker`] runs an executor on its own thread behind a message queue.
//! Lower layers (`loupe-core` documents, `loupe-search` indices) are reachable
//! through the re-exported types.

// Re-export the public API from loupe-executor
pub use loupe_executor::*;
