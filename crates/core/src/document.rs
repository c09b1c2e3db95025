//! Document types for loupe
//!
//! This module defines:
//! - DocId: caller-supplied document identifier
//! - FieldValue: the three shapes a field value can take
//! - Fields: ordered field-name → value mapping
//! - Document: an identifier plus its fields
//!
//! ## Value Shapes
//!
//! Documents arrive as loosely-typed JSON objects. Every field value is
//! classified once, on the way in:
//!
//! | JSON value | FieldValue | Tokenized |
//! |------------|------------|-----------|
//! | string | `Text` | yes |
//! | array of strings only | `TextList` | every item |
//! | anything else | `Opaque` | no |
//!
//! `Opaque` values are stored verbatim so they can be handed back with
//! search results, but they never contribute tokens.

use crate::error::{Error, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;

/// Name of the reserved identifier field in inbound documents.
pub const ID_FIELD: &str = "id";

// ============================================================================
// DocId
// ============================================================================

/// Unique, caller-supplied document identifier.
///
/// On the wire an identifier may be a JSON string or a JSON number, and it
/// keeps that shape: `7` and `"7"` name different documents, and each is
/// reported back with its original type.
///
/// Identifiers order numbers first (by value), then strings (by text).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocId {
    /// Numeric identifier
    Number(Number),
    /// String identifier
    Text(String),
}

impl DocId {
    /// Create a string identifier
    pub fn new(id: impl Into<String>) -> Self {
        DocId::Text(id.into())
    }

    /// Interpret a JSON value as a document identifier.
    ///
    /// Returns `None` for anything other than a string or a number.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(DocId::Text(s.clone())),
            Value::Number(n) => Some(DocId::from(n.clone())),
            _ => None,
        }
    }

    /// The identifier in its wire shape
    pub fn to_json(&self) -> Value {
        match self {
            DocId::Number(n) => Value::Number(n.clone()),
            DocId::Text(s) => Value::String(s.clone()),
        }
    }

    /// The identifier text, if this is a string identifier
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DocId::Text(s) => Some(s),
            DocId::Number(_) => None,
        }
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocId::Number(n) => write!(f, "{}", n),
            DocId::Text(s) => f.write_str(s),
        }
    }
}

impl Ord for DocId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DocId::Number(a), DocId::Number(b)) => compare_numbers(a, b),
            (DocId::Number(_), DocId::Text(_)) => Ordering::Less,
            (DocId::Text(_), DocId::Number(_)) => Ordering::Greater,
            (DocId::Text(a), DocId::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for DocId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Numbers that compare equal by value but differ in representation
// (`1` vs `1.0`) are ordered by their text so the order stays total.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let by_value = match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    };
    by_value.then_with(|| a.to_string().cmp(&b.to_string()))
}

impl From<Number> for DocId {
    fn from(n: Number) -> Self {
        // -0.0 equals 0.0 but prints differently; keep one representation
        if n.is_f64() && n.as_f64() == Some(0.0) {
            if let Some(zero) = Number::from_f64(0.0) {
                return DocId::Number(zero);
            }
        }
        DocId::Number(n)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        DocId::Text(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        DocId::Text(s)
    }
}

impl From<u64> for DocId {
    fn from(n: u64) -> Self {
        DocId::Number(Number::from(n))
    }
}

impl From<i64> for DocId {
    fn from(n: i64) -> Self {
        DocId::Number(Number::from(n))
    }
}

impl Serialize for DocId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DocId::Number(n) => n.serialize(serializer),
            DocId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for DocId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        DocId::from_json(&value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "document id must be a string or number, got {}",
                json_kind(&value)
            ))
        })
    }
}

// ============================================================================
// FieldValue
// ============================================================================

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text
    Text(String),
    /// Ordered sequence of free-text strings
    TextList(Vec<String>),
    /// Any other JSON value; stored for display, never tokenized
    Opaque(Value),
}

impl FieldValue {
    /// Classify a JSON value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) if items.iter().all(Value::is_string) => FieldValue::TextList(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => FieldValue::Opaque(other),
        }
    }

    /// Convert back to the JSON shape the caller supplied.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::TextList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            FieldValue::Opaque(v) => v.clone(),
        }
    }

    /// The text items this value contributes to the index.
    ///
    /// Empty for `Opaque` values.
    pub fn texts(&self) -> &[String] {
        match self {
            FieldValue::Text(s) => std::slice::from_ref(s),
            FieldValue::TextList(items) => items.as_slice(),
            FieldValue::Opaque(_) => &[],
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::TextList(items)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::TextList(items) => serializer.collect_seq(items),
            FieldValue::Opaque(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FieldValue::from_json)
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Ordered mapping from field name to value.
///
/// Preserves the order in which fields were supplied. Field names are unique;
/// inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, FieldValue)>);

impl Fields {
    /// Create an empty field map
    pub fn new() -> Self {
        Fields(Vec::new())
    }

    /// Insert or replace a field
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate fields in their original order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate `(field name, text)` pairs for every tokenizable text item
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(name, value)| {
            value
                .texts()
                .iter()
                .map(move |text| (name.as_str(), text.as_str()))
        })
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from a JSON object, classifying every value
    pub fn from_json_map(map: Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(name, value)| (name, FieldValue::from_json(value)))
            .collect()
    }

    /// Convert to a JSON object in field order
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, FieldValue)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, v)| (n, v)))
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Fields::from_json_map)
    }
}

// ============================================================================
// Document
// ============================================================================

/// A document: identifier plus field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document identifier
    pub id: DocId,
    /// Field values, excluding the identifier
    pub fields: Fields,
}

impl Document {
    /// Create a document from parts
    pub fn new(id: impl Into<DocId>, fields: Fields) -> Self {
        Document {
            id: id.into(),
            fields,
        }
    }

    /// Split a JSON object into its `id` and remaining fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` if the value is not an object or its `id`
    /// is missing or not a string/number.
    pub fn from_json(value: Value) -> Result<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidDocument(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut id = None;
        let mut fields = Fields::new();
        for (name, value) in map {
            if name == ID_FIELD {
                id = Some(value);
            } else {
                fields.insert(name, FieldValue::from_json(value));
            }
        }

        let id = match id {
            Some(raw) => DocId::from_json(&raw).ok_or_else(|| {
                Error::InvalidDocument(format!(
                    "'{}' must be a string or number, got {}",
                    ID_FIELD,
                    json_kind(&raw)
                ))
            })?,
            None => {
                return Err(Error::InvalidDocument(format!(
                    "missing required '{}' field",
                    ID_FIELD
                )))
            }
        };

        Ok(Document { id, fields })
    }

    /// Convert back to a JSON object with `id` first
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(ID_FIELD.to_string(), self.id.to_json());
        for (name, value) in self.fields.iter() {
            map.insert(name.to_string(), value.to_json());
        }
        Value::Object(map)
    }

    /// Decompose into identifier and fields
    pub fn into_parts(self) -> (DocId, Fields) {
        (self.id, self.fields)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_json(value).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Value> for Document {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Document::from_json(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
