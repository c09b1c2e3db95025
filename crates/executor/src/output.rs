//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is deterministic:
//! the same command always produces the same output variant (though the values
//! may differ based on index state).

use loupe_search::{IndexStats, SearchHit};
use serde::Serialize;
use serde_json::{json, Value};

use crate::Result;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```
/// use loupe_executor::{Command, Executor, Output};
///
/// let mut executor = Executor::new();
/// match executor.execute(Command::GetStats).unwrap() {
///     Output::Stats(stats) => assert_eq!(stats.document_count, 0),
///     other => panic!("GetStats always returns Stats, got {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Output {
    /// Mutation acknowledged (addDocument, removeDocument, clear)
    Success,

    /// Number of documents processed (addDocuments)
    Count(usize),

    /// Ranked search results
    Hits(Vec<SearchHit>),

    /// Index statistics
    Stats(IndexStats),
}

impl Output {
    /// Payload carried by a result reply
    ///
    /// | Output | data |
    /// |--------|------|
    /// | `Success` | `{ "success": true }` |
    /// | `Count(n)` | `{ "success": true, "count": n }` |
    /// | `Hits` | array of hits |
    /// | `Stats` | stats object |
    pub fn to_data(&self) -> Result<Value> {
        Ok(match self {
            Output::Success => json!({ "success": true }),
            Output::Count(count) => json!({ "success": true, "count": count }),
            Output::Hits(hits) => serde_json::to_value(hits)?,
            Output::Stats(stats) => serde_json::to_value(stats)?,
        })
    }
}
