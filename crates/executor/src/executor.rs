//! The Executor - single entry point to the search engine.
//!
//! The Executor owns the [`SearchIndex`] and routes commands to the handler
//! for their category. It is the only writer of the index state.

use loupe_search::SearchIndex;
use tracing::debug;

use crate::{Command, Output, Result};

/// The command executor - single entry point to the search engine.
///
/// # Thread Safety
///
/// `execute` takes `&mut self`; concurrent access goes through a
/// [`SearchWorker`](crate::SearchWorker), which gives the executor to a single
/// thread and serializes every command through its queue.
///
/// # Example
///
/// ```
/// use loupe_executor::{Command, Executor, Output};
/// use serde_json::json;
///
/// let mut executor = Executor::new();
/// let add = Command::from_request("addDocument", json!({"id": "q3", "title": "Quarterly report"})).unwrap();
/// executor.execute(add).unwrap();
///
/// let search = Command::from_request("search", json!({"query": "report"})).unwrap();
/// match executor.execute(search).unwrap() {
///     Output::Hits(hits) => assert_eq!(hits[0].id.as_text(), Some("q3")),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Default)]
pub struct Executor {
    index: SearchIndex,
}

impl Executor {
    /// Create an executor over an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor over an existing index.
    pub fn with_index(index: SearchIndex) -> Self {
        Self { index }
    }

    /// Read access to the underlying index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&mut self, cmd: Command) -> Result<Output> {
        debug!(command = cmd.name(), "executing");
        match cmd {
            // Document commands
            Command::AddDocument(doc) => crate::handlers::document::add_document(&mut self.index, doc),
            Command::AddDocuments(docs) => {
                crate::handlers::document::add_documents(&mut self.index, docs)
            }
            Command::RemoveDocument { id } => {
                crate::handlers::document::remove_document(&mut self.index, id)
            }
            Command::Clear => crate::handlers::document::clear(&mut self.index),

            // Query commands
            Command::Search { query, options } => {
                crate::handlers::search::search(&self.index, &query, &options)
            }
            Command::GetStats => crate::handlers::search::stats(&self.index),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in the same order as the input commands.
    /// Execution continues even if some commands fail.
    pub fn execute_many(&mut self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }
}
