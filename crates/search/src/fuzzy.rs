//! Edit-distance fuzzy matching
//!
//! A corpus token matches a query token when their Levenshtein distance is at
//! most `floor(len(query) / 3)`, lengths counted in characters.
//!
//! # Cost
//!
//! Matching scans every distinct token of the target index and runs the
//! dynamic-programming distance against each, so one query token costs
//! O(unique tokens × token length²). Callers should treat fuzzy search as an
//! expensive opt-in.

use crate::index::InvertedIndex;
use loupe_core::DocId;
use std::collections::BTreeSet;

/// Maximum edit distance tolerated for a query token
#[inline]
pub fn max_edits(token: &str) -> usize {
    token.chars().count() / 3
}

/// Levenshtein distance between two strings
///
/// Insertion, deletion and substitution each cost 1. Operates on characters,
/// not bytes.
///
/// # Example
///
/// ```
/// use loupe_search::fuzzy::levenshtein;
///
/// assert_eq!(levenshtein("contract", "contrakt"), 1);
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// ```
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_chars(&a, &b)
}

fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the DP matrix: prev = row i, curr = row i + 1
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Corpus tokens within the edit threshold of a query token, and the union of
/// their posting sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    /// Matching corpus tokens, sorted
    pub tokens: Vec<&'a str>,
    /// Documents posted under any matching token
    pub ids: BTreeSet<&'a DocId>,
}

impl FuzzyMatch<'_> {
    /// Whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Find every token in `index` within `max_edits(query_token)` of the query.
///
/// Exact matches (distance 0) are included.
pub fn fuzzy_match<'a>(query_token: &str, index: &'a InvertedIndex) -> FuzzyMatch<'a> {
    let query: Vec<char> = query_token.chars().collect();
    let threshold = query.len() / 3;

    let mut result = FuzzyMatch::default();
    for (token, postings) in index.iter() {
        let candidate: Vec<char> = token.chars().collect();
        // Distance is at least the length difference
        if candidate.len().abs_diff(query.len()) > threshold {
            continue;
        }
        if levenshtein_chars(&query, &candidate) <= threshold {
            result.tokens.push(token);
            result.ids.extend(postings.iter());
        }
    }
    result.tokens.sort_unstable();
    result
}
