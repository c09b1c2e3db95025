//! Inverted indices for keyword search
//!
//! This module provides:
//! - PostingSet: the set of document ids that produced a token
//! - InvertedIndex: token → posting set
//! - FieldIndexes: field name → InvertedIndex, for field-scoped queries
//!
//! # Invariants
//!
//! - A token key never maps to an empty posting set; retracting the last id
//!   removes the key.
//! - Indices store document ids only, never field values.
//!
//! Posting sets are ordered by document id so iteration is deterministic.

use loupe_core::DocId;
use rustc_hash::FxHashMap;
use std::collections::btree_set;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// PostingSet
// ============================================================================

/// Documents containing a token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingSet {
    ids: BTreeSet<DocId>,
}

impl PostingSet {
    /// Create a new empty posting set
    pub fn new() -> Self {
        PostingSet {
            ids: BTreeSet::new(),
        }
    }

    /// Add a document. Returns false if it was already present.
    pub fn insert(&mut self, id: DocId) -> bool {
        self.ids.insert(id)
    }

    /// Remove a document. Returns false if it was absent.
    pub fn remove(&mut self, id: &DocId) -> bool {
        self.ids.remove(id)
    }

    /// Whether the document is in this set
    pub fn contains(&self, id: &DocId) -> bool {
        self.ids.contains(id)
    }

    /// Number of documents containing this token
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if posting set is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate document ids in ascending order
    pub fn iter(&self) -> btree_set::Iter<'_, DocId> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a PostingSet {
    type Item = &'a DocId;
    type IntoIter = btree_set::Iter<'a, DocId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

// ============================================================================
// InvertedIndex
// ============================================================================

/// Token → posting set mapping
///
/// Used both as the global index spanning all fields and as the per-field
/// index inside [`FieldIndexes`].
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: FxHashMap<String, PostingSet>,
}

impl InvertedIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        InvertedIndex {
            postings: FxHashMap::default(),
        }
    }

    /// Record that `id` produced `token`, creating the posting set on first use
    pub fn insert(&mut self, token: &str, id: &DocId) {
        match self.postings.get_mut(token) {
            Some(set) => {
                set.insert(id.clone());
            }
            None => {
                let mut set = PostingSet::new();
                set.insert(id.clone());
                self.postings.insert(token.to_string(), set);
            }
        }
    }

    /// Remove `id` from the posting set of `token`
    ///
    /// Drops the token key when its posting set becomes empty. Returns true
    /// if the id was present. Retracting an absent posting is a no-op.
    pub fn retract(&mut self, token: &str, id: &DocId) -> bool {
        let Some(set) = self.postings.get_mut(token) else {
            return false;
        };
        let removed = set.remove(id);
        if set.is_empty() {
            self.postings.remove(token);
        }
        removed
    }

    /// Lookup documents containing a token
    ///
    /// Returns None if the token is not indexed.
    pub fn lookup(&self, token: &str) -> Option<&PostingSet> {
        self.postings.get(token)
    }

    /// Whether `id` is posted under `token`
    pub fn contains(&self, token: &str, id: &DocId) -> bool {
        self.postings
            .get(token)
            .map_or(false, |set| set.contains(id))
    }

    /// Iterate `(token, posting set)` pairs (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingSet)> {
        self.postings.iter().map(|(t, s)| (t.as_str(), s))
    }

    /// Number of unique tokens
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Whether no tokens are indexed
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Clear all index data
    pub fn clear(&mut self) {
        self.postings.clear();
    }
}

// ============================================================================
// FieldIndexes
// ============================================================================

/// One [`InvertedIndex`] per field name
///
/// Field tables are created lazily on first use and are never pruned, even
/// when they become empty; field names are low-cardinality.
#[derive(Debug, Clone, Default)]
pub struct FieldIndexes {
    fields: BTreeMap<String, InvertedIndex>,
}

impl FieldIndexes {
    /// Create an empty field table
    pub fn new() -> Self {
        FieldIndexes {
            fields: BTreeMap::new(),
        }
    }

    /// Get the index for a field, creating it if needed
    pub fn ensure(&mut self, field: &str) -> &mut InvertedIndex {
        self.fields.entry(field.to_string()).or_default()
    }

    /// Get the index for a field
    pub fn get(&self, field: &str) -> Option<&InvertedIndex> {
        self.fields.get(field)
    }

    /// Get the index for a field mutably, without creating it
    pub fn get_mut(&mut self, field: &str) -> Option<&mut InvertedIndex> {
        self.fields.get_mut(field)
    }

    /// Field names that have been indexed, in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate `(field name, index)` pairs in ascending field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InvertedIndex)> {
        self.fields.iter().map(|(f, i)| (f.as_str(), i))
    }

    /// Number of field tables
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field has been indexed
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop every field table
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
