//! Text tokenizer for indexing and querying
//!
//! The same tokenizer runs at index time and at query time; any asymmetry
//! between the two would make indexed documents unreachable.
//!
//! Pipeline: lowercase → punctuation to spaces → split on whitespace
//!           → drop tokens shorter than [`MIN_TOKEN_LEN`]

/// Minimum token length in characters. Shorter tokens are discarded.
pub const MIN_TOKEN_LEN: usize = 3;

/// Word characters: letters, digits and underscore.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize text into searchable terms
///
/// - Lowercase
/// - Replace every character that is neither a word character nor
///   whitespace with a space
/// - Split on runs of whitespace
/// - Filter tokens shorter than 3 characters
///
/// Order is preserved and duplicates are kept.
///
/// # Example
///
/// ```
/// use loupe_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Net 30, to pay!");
/// assert_eq!(tokens, vec!["net", "pay"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if is_word_char(c) || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|s| s.chars().count() >= MIN_TOKEN_LEN)
        .map(String::from)
        .collect()
}

/// Tokenize and deduplicate for query processing
///
/// # Example
///
/// ```
/// use loupe_search::tokenizer::tokenize_unique;
///
/// let tokens = tokenize_unique("test test TEST");
/// assert_eq!(tokens, vec!["test"]);
/// ```
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
