//! Query command handlers.

use loupe_search::{SearchIndex, SearchOptions};

use crate::{Output, Result};

/// Handle search: ranked query over the index
pub fn search(index: &SearchIndex, query: &str, options: &SearchOptions) -> Result<Output> {
    Ok(Output::Hits(index.search(query, options)))
}

/// Handle getStats
pub fn stats(index: &SearchIndex) -> Result<Output> {
    Ok(Output::Stats(index.stats()))
}
