//! Command handlers organized by category.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `document` | addDocument, addDocuments, removeDocument, clear |
//! | `search` | search, getStats |

pub mod document;
pub mod search;
