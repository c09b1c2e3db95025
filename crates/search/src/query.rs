//! Query engine: token lookup, score accumulation and ranking
//!
//! # Algorithm
//!
//! 1. Tokenize the query with the indexing tokenizer (de-duplicated).
//! 2. For each query token collect matching documents from the global index,
//!    or from the union of the named field indices, adding fuzzy matches when
//!    enabled.
//! 3. A document's score is the number of distinct query tokens that matched
//!    it; `matches` lists those query tokens in query order.
//! 4. Optionally sort by relevance, truncate to `limit`, hydrate from the
//!    document store.
//!
//! Candidates are kept in discovery order (query-token order, then ascending
//! document id). Relevance sorting is stable on descending score with the
//! document id as secondary key, so equal scores come back in id order.

use crate::fuzzy::fuzzy_match;
use crate::index::{FieldIndexes, InvertedIndex};
use crate::store::DocumentStore;
use crate::tokenizer::tokenize_unique;
use loupe_core::{DocId, Fields};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// Default maximum number of results
pub const DEFAULT_LIMIT: usize = 50;

// ============================================================================
// Options
// ============================================================================

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Descending score (wire value `"relevance"`)
    #[default]
    Relevance,
    /// Discovery order, no sorting. Any non-null wire value other than
    /// `"relevance"`.
    Unsorted,
}

impl Serialize for SortBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            SortBy::Relevance => "relevance",
            SortBy::Unsorted => "none",
        })
    }
}

impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => SortBy::default(),
            serde_json::Value::String(s) if s == "relevance" => SortBy::Relevance,
            _ => SortBy::Unsorted,
        })
    }
}

/// Per-call search options
///
/// Wire form (all keys optional; `null` counts as absent):
///
/// ```json
/// { "fields": ["title"], "fuzzy": true, "limit": 10, "sortBy": "relevance" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Restrict matching to these field indices; empty means the global index
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<String>,
    /// Widen token matches with edit-distance matching
    #[serde(deserialize_with = "null_as_default")]
    pub fuzzy: bool,
    /// Maximum number of results
    #[serde(deserialize_with = "null_as_default_limit")]
    pub limit: usize,
    /// Result ordering
    pub sort_by: SortBy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            fields: Vec::new(),
            fuzzy: false,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::Relevance,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(Option::<usize>::deserialize(deserializer)?.unwrap_or(DEFAULT_LIMIT))
}

impl SearchOptions {
    /// Builder: restrict to fields
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: enable or disable fuzzy matching
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Builder: set result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Builder: set ordering
    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

// ============================================================================
// SearchHit
// ============================================================================

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Matching document
    pub id: DocId,
    /// Number of distinct query tokens that matched
    pub score: usize,
    /// The query tokens that matched, in query order
    pub matches: Vec<String>,
    /// Stored field values of the document
    pub document: Fields,
}

// ============================================================================
// QueryEngine
// ============================================================================

struct Candidate<'a> {
    id: &'a DocId,
    score: usize,
    matches: Vec<String>,
}

/// Read-only view over the engine state used to answer one query
pub struct QueryEngine<'a> {
    store: &'a DocumentStore,
    global: &'a InvertedIndex,
    fields: &'a FieldIndexes,
}

impl<'a> QueryEngine<'a> {
    /// Create a query view
    pub fn new(
        store: &'a DocumentStore,
        global: &'a InvertedIndex,
        fields: &'a FieldIndexes,
    ) -> Self {
        QueryEngine {
            store,
            global,
            fields,
        }
    }

    /// Run a query
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchHit> {
        let tokens = tokenize_unique(query);
        if tokens.is_empty() || options.limit == 0 {
            return Vec::new();
        }

        let targets = self.target_indices(options);

        let mut candidates: Vec<Candidate<'a>> = Vec::new();
        let mut slots: FxHashMap<&'a DocId, usize> = FxHashMap::default();

        for token in &tokens {
            for id in self.resolve(token, &targets, options.fuzzy) {
                let slot = *slots.entry(id).or_insert_with(|| {
                    candidates.push(Candidate {
                        id,
                        score: 0,
                        matches: Vec::new(),
                    });
                    candidates.len() - 1
                });
                let candidate = &mut candidates[slot];
                candidate.score += 1;
                candidate.matches.push(token.clone());
            }
        }

        if options.sort_by == SortBy::Relevance {
            candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(b.id)));
        }
        candidates.truncate(options.limit);

        let hits: Vec<SearchHit> = candidates
            .into_iter()
            .filter_map(|c| {
                self.store.get(c.id).map(|doc| SearchHit {
                    id: c.id.clone(),
                    score: c.score,
                    matches: c.matches,
                    document: doc.fields.clone(),
                })
            })
            .collect();

        tracing::debug!(
            query_tokens = tokens.len(),
            hits = hits.len(),
            fuzzy = options.fuzzy,
            "search completed"
        );
        hits
    }

    /// Indices a query consults: the global index, or each named field index.
    /// Unknown field names contribute nothing.
    fn target_indices(&self, options: &SearchOptions) -> Vec<&'a InvertedIndex> {
        if options.fields.is_empty() {
            vec![self.global]
        } else {
            options
                .fields
                .iter()
                .filter_map(|field| self.fields.get(field))
                .collect()
        }
    }

    /// Documents matching one query token across the target indices
    fn resolve(
        &self,
        token: &str,
        targets: &[&'a InvertedIndex],
        fuzzy: bool,
    ) -> BTreeSet<&'a DocId> {
        let mut ids = BTreeSet::new();
        for index in targets {
            if let Some(postings) = index.lookup(token) {
                ids.extend(postings.iter());
            }
            if fuzzy {
                ids.extend(fuzzy_match(token, index).ids);
            }
        }
        ids
    }
}
