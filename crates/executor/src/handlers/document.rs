//! Document command handlers.
//!
//! Mutations of the index: add, batch add, remove and clear.

use loupe_core::{DocId, Document};
use loupe_search::SearchIndex;
use serde_json::Value;

use crate::{Error, Output, Result};

/// Handle addDocument: insert or replace one document
pub fn add_document(index: &mut SearchIndex, doc: Document) -> Result<Output> {
    index.add_document(doc);
    Ok(Output::Success)
}

/// Handle addDocuments: insert documents in order
///
/// Elements are decoded lazily, so a malformed element fails the command
/// after every earlier element has been indexed.
pub fn add_documents(index: &mut SearchIndex, docs: Vec<Value>) -> Result<Output> {
    let count = index.try_add_documents(
        docs.into_iter()
            .enumerate()
            .map(|(position, raw)| {
                Document::from_json(raw).map_err(|e| Error::InvalidInput {
                    reason: format!("document at position {}: {}", position, e),
                })
            }),
    )?;
    Ok(Output::Count(count))
}

/// Handle removeDocument. A missing id is a no-op.
pub fn remove_document(index: &mut SearchIndex, id: Option<DocId>) -> Result<Output> {
    if let Some(id) = id {
        index.remove_document(&id);
    }
    Ok(Output::Success)
}

/// Handle clear: drop every document and index
pub fn clear(index: &mut SearchIndex) -> Result<Output> {
    index.clear();
    Ok(Output::Success)
}
