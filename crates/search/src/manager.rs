//! Index manager: the mutation surface that keeps store and indices consistent
//!
//! [`SearchIndex`] owns the document store, the global inverted index and the
//! per-field indices. All mutation goes through it so the following hold
//! after every operation:
//!
//! - No index maps a token to an empty posting set.
//! - `(token, id)` is posted globally iff it is posted in at least one field
//!   index, and only for documents currently stored.
//! - Adding an existing id replaces the document: the previous version's
//!   postings are retracted before the new fields are indexed.
//!
//! # Concurrency
//!
//! Single writer, single reader. `SearchIndex` is a plain owned value; callers
//! that need cross-thread access serialize it (see the executor's worker).

use crate::index::{FieldIndexes, InvertedIndex};
use crate::query::{QueryEngine, SearchHit, SearchOptions};
use crate::store::DocumentStore;
use crate::tokenizer::tokenize;
use loupe_core::{DocId, Document, Fields};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::{debug, info, warn};

// ============================================================================
// IndexStats
// ============================================================================

/// Index statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    /// Number of stored documents
    pub document_count: usize,
    /// Number of unique tokens in the global index
    pub token_count: usize,
    /// Field names indexed since the last clear, ascending
    pub fields: Vec<String>,
    /// Mean tokens emitted per stored document
    pub avg_tokens_per_doc: f64,
}

// ============================================================================
// SearchIndex
// ============================================================================

/// In-memory full-text index over whole documents
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    store: DocumentStore,
    global: InvertedIndex,
    fields: FieldIndexes,
}

impl SearchIndex {
    /// Create an empty index
    pub fn new() -> Self {
        SearchIndex {
            store: DocumentStore::new(),
            global: InvertedIndex::new(),
            fields: FieldIndexes::new(),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add or replace a document
    ///
    /// `Text` fields are indexed under their name; every item of a `TextList`
    /// is indexed under the list's field name. `Opaque` fields are stored but
    /// not tokenized.
    pub fn add_document(&mut self, doc: Document) {
        let (id, fields) = doc.into_parts();

        let replaced = self.retract(&id);

        let mut token_count = 0;
        for (field, text) in fields.texts() {
            let field_index = self.fields.ensure(field);
            for token in tokenize(text) {
                self.global.insert(&token, &id);
                field_index.insert(&token, &id);
                token_count += 1;
            }
        }

        debug!(doc_id = %id, token_count, replaced, "indexed document");
        self.store.insert(id, fields, token_count);
    }

    /// Add documents in order, returning how many were processed
    pub fn add_documents<I>(&mut self, docs: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        match self.try_add_documents(docs.into_iter().map(Ok::<_, Infallible>)) {
            Ok(count) => count,
            Err(never) => match never {},
        }
    }

    /// Add documents in order, stopping at the first error
    ///
    /// Not atomic: documents before the failing element stay indexed. On
    /// success returns how many documents were processed.
    pub fn try_add_documents<I, E>(&mut self, docs: I) -> Result<usize, E>
    where
        I: IntoIterator<Item = Result<Document, E>>,
    {
        let mut count = 0;
        for doc in docs {
            match doc {
                Ok(doc) => {
                    self.add_document(doc);
                    count += 1;
                }
                Err(e) => {
                    warn!(
                        indexed = count,
                        "batch aborted partway; earlier documents remain indexed"
                    );
                    return Err(e);
                }
            }
        }
        Ok(count)
    }

    /// Remove a document
    ///
    /// Unknown ids are a no-op. Returns true if the document existed.
    pub fn remove_document(&mut self, id: &DocId) -> bool {
        let existed = self.retract(id);
        if existed {
            self.store.remove(id);
            debug!(doc_id = %id, "removed document");
        }
        existed
    }

    /// Reset store and all indices
    pub fn clear(&mut self) {
        let documents = self.store.len();
        self.store.clear();
        self.global.clear();
        self.fields.clear();
        info!(documents, "index cleared");
    }

    /// Retract every posting contributed by a stored document
    ///
    /// Tokens are re-derived from the stored fields. Leaves the store entry in
    /// place. Idempotent. Returns true if the document is stored.
    fn retract(&mut self, id: &DocId) -> bool {
        let Some(stored) = self.store.get(id) else {
            return false;
        };
        for (field, text) in stored.fields.texts() {
            let mut field_index = self.fields.get_mut(field);
            for token in tokenize(text) {
                self.global.retract(&token, id);
                if let Some(index) = field_index.as_deref_mut() {
                    index.retract(&token, id);
                }
            }
        }
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Run a ranked query
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        QueryEngine::new(&self.store, &self.global, &self.fields).search(query, options)
    }

    /// Look up a stored document's fields
    pub fn get_document(&self, id: &DocId) -> Option<&Fields> {
        self.store.get(id).map(|doc| &doc.fields)
    }

    /// Whether a document is stored
    pub fn contains(&self, id: &DocId) -> bool {
        self.store.contains(id)
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no documents are stored
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Statistics snapshot
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.store.len(),
            token_count: self.global.len(),
            fields: self.fields.names().map(String::from).collect(),
            avg_tokens_per_doc: self.store.avg_tokens_per_doc(),
        }
    }

    /// The global token index
    pub fn global_index(&self) -> &InvertedIndex {
        &self.global
    }

    /// The per-field token indices
    pub fn field_indexes(&self) -> &FieldIndexes {
        &self.fields
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Verify the structural invariants of store and indices
    ///
    /// Returns a description of the first violation found. Intended for tests
    /// and debugging; cost is linear in the number of postings.
    pub fn check_invariants(&self) -> Result<(), String> {
        for (token, postings) in self.global.iter() {
            if postings.is_empty() {
                return Err(format!("global token '{}' has an empty posting set", token));
            }
            for id in postings {
                if !self.store.contains(id) {
                    return Err(format!(
                        "global token '{}' references unknown document '{}'",
                        token, id
                    ));
                }
                if !self.fields.iter().any(|(_, index)| index.contains(token, id)) {
                    return Err(format!(
                        "global posting ('{}', '{}') has no field posting",
                        token, id
                    ));
                }
            }
        }

        for (field, index) in self.fields.iter() {
            for (token, postings) in index.iter() {
                if postings.is_empty() {
                    return Err(format!(
                        "field '{}' token '{}' has an empty posting set",
                        field, token
                    ));
                }
                for id in postings {
                    if !self.global.contains(token, id) {
                        return Err(format!(
                            "field posting ('{}', '{}', '{}') missing from global index",
                            field, token, id
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
