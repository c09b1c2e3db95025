//! Command enum defining all engine operations.
//!
//! Commands are the "instruction set" of the engine. Every inbound message is
//! decoded into exactly one variant before dispatch.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Encode to the `{ type, data }` shape of the wire protocol
//! - **Pure data**: No closures or executable code

use loupe_core::{DocId, Document};
use loupe_search::SearchOptions;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// A command is a self-contained operation on the search engine.
///
/// | type | data | Output |
/// |------|------|--------|
/// | `addDocument` | document object with `id` | `Output::Success` |
/// | `addDocuments` | array of document objects | `Output::Count` |
/// | `removeDocument` | `{ id }` | `Output::Success` |
/// | `search` | `{ query, options }` | `Output::Hits` |
/// | `getStats` | — | `Output::Stats` |
/// | `clear` | — | `Output::Success` |
///
/// # Example
///
/// ```
/// use loupe_executor::Command;
/// use serde_json::json;
///
/// let cmd = Command::from_request("removeDocument", json!({"id": "d1"})).unwrap();
/// assert_eq!(serde_json::to_value(&cmd).unwrap()["type"], "removeDocument");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Command {
    /// Add or replace a document.
    /// Returns: `Output::Success`
    AddDocument(Document),

    /// Add documents in order.
    ///
    /// Elements stay raw until execution so that a malformed element aborts
    /// the batch after the earlier ones are indexed.
    /// Returns: `Output::Count`
    AddDocuments(Vec<Value>),

    /// Remove a document. A missing or invalid id is a no-op.
    /// Returns: `Output::Success`
    RemoveDocument {
        /// Document to remove
        id: Option<DocId>,
    },

    /// Ranked search.
    /// Returns: `Output::Hits`
    Search {
        /// Free-text query
        query: String,
        /// Per-call options
        options: SearchOptions,
    },

    /// Index statistics.
    /// Returns: `Output::Stats`
    GetStats,

    /// Drop every document and index.
    /// Returns: `Output::Success`
    Clear,
}

impl Command {
    /// Decode an operation name and its payload.
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` for an unrecognized operation name
    /// - `InvalidInput` for a payload that cannot be interpreted
    pub fn from_request(operation: &str, data: Value) -> Result<Command> {
        match operation {
            "addDocument" => Ok(Command::AddDocument(Document::from_json(data)?)),
            "addDocuments" => match data {
                Value::Array(docs) => Ok(Command::AddDocuments(docs)),
                other => Err(Error::InvalidInput {
                    reason: format!("addDocuments expects an array, got {}", other),
                }),
            },
            "removeDocument" => Ok(Command::RemoveDocument {
                id: data.get("id").and_then(DocId::from_json),
            }),
            "search" => {
                let query = match data.get("query") {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(q)) => q.clone(),
                    Some(other) => {
                        return Err(Error::InvalidInput {
                            reason: format!("search query must be a string, got {}", other),
                        })
                    }
                };
                let options = match data.get("options") {
                    None | Some(Value::Null) => SearchOptions::default(),
                    Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
                        Error::InvalidInput {
                            reason: format!("invalid search options: {}", e),
                        }
                    })?,
                };
                Ok(Command::Search { query, options })
            }
            "getStats" => Ok(Command::GetStats),
            "clear" => Ok(Command::Clear),
            other => Err(Error::UnknownOperation {
                operation: other.to_string(),
            }),
        }
    }

    /// Wire name of this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddDocument(_) => "addDocument",
            Command::AddDocuments(_) => "addDocuments",
            Command::RemoveDocument { .. } => "removeDocument",
            Command::Search { .. } => "search",
            Command::GetStats => "getStats",
            Command::Clear => "clear",
        }
    }
}
