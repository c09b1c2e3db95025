//! Core types for loupe
//!
//! This crate defines the foundational types shared by the search engine and
//! the message executor:
//! - DocId: caller-supplied document identifier
//! - FieldValue: tagged field value (text, text list, opaque)
//! - Fields / Document: ordered field maps and whole documents
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;

pub use document::{DocId, Document, FieldValue, Fields, ID_FIELD};
pub use error::{Error, Result};
