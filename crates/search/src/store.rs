//! Authoritative document storage
//!
//! The store owns every document's field values. Indices refer back to it by
//! [`DocId`] only, and search results are hydrated from here.

use loupe_core::{DocId, Fields};
use rustc_hash::FxHashMap;

/// A stored document's fields plus the number of tokens they produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Field values exactly as supplied (minus the id)
    pub fields: Fields,
    /// Tokens emitted by the tokenizer across all text fields, duplicates included
    pub token_count: usize,
}

/// Map from document id to stored document
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: FxHashMap<DocId, StoredDocument>,
    /// Sum of `token_count` over all stored documents
    total_tokens: usize,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        DocumentStore {
            docs: FxHashMap::default(),
            total_tokens: 0,
        }
    }

    /// Store a document, returning the previous version if any
    pub fn insert(
        &mut self,
        id: DocId,
        fields: Fields,
        token_count: usize,
    ) -> Option<StoredDocument> {
        self.total_tokens += token_count;
        let previous = self.docs.insert(
            id,
            StoredDocument {
                fields,
                token_count,
            },
        );
        if let Some(prev) = &previous {
            self.total_tokens -= prev.token_count;
        }
        previous
    }

    /// Remove a document, returning it if it was present
    pub fn remove(&mut self, id: &DocId) -> Option<StoredDocument> {
        let removed = self.docs.remove(id);
        if let Some(doc) = &removed {
            self.total_tokens -= doc.token_count;
        }
        removed
    }

    /// Look up a stored document
    pub fn get(&self, id: &DocId) -> Option<&StoredDocument> {
        self.docs.get(id)
    }

    /// Whether a document is stored
    pub fn contains(&self, id: &DocId) -> bool {
        self.docs.contains_key(id)
    }

    /// Iterate stored documents (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&DocId, &StoredDocument)> {
        self.docs.iter()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Mean token count per stored document, 0.0 when empty
    pub fn avg_tokens_per_doc(&self) -> f64 {
        if self.docs.is_empty() {
            return 0.0;
        }
        self.total_tokens as f64 / self.docs.len() as f64
    }

    /// Remove every document
    pub fn clear(&mut self) {
        self.docs.clear();
        self.total_tokens = 0;
    }
}
