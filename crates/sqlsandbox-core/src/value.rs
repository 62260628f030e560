//! Scalar values and result records.

use indexmap::IndexMap;
use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One result row keyed by output column name, in output-column order.
pub type Record = IndexMap<String, ScalarValue>;

/// A single cell value as it crosses the API boundary.
///
/// Serializes to the bare JSON scalar (`null`, `true`, `42`, `1.5`, `"text"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ScalarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

impl From<ValueRef<'_>> for ScalarValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => ScalarValue::Null,
            ValueRef::Integer(i) => ScalarValue::Integer(i),
            ValueRef::Real(f) if f.is_finite() => ScalarValue::Real(f),
            ValueRef::Real(_) => ScalarValue::Null,
            ValueRef::Text(bytes) => ScalarValue::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => ScalarValue::Text(blob_literal(bytes)),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Integer(value)
    }
}

/// Render a blob the way SQLite spells blob literals: `x'0a1b'`.
fn blob_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 3);
    out.push_str("x'");
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out.push('\'');
    out
}
