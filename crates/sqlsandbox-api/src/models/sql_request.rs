//! SQL request model
//!
//! Body of `POST /api/execute-sql` and of the practice answer check.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Request payload carrying one SQL statement.
///
/// # Example
/// ```json
/// {
///   "query": "SELECT * FROM users LIMIT 2;"
/// }
/// ```
///
/// `query` is kept as raw JSON so that a missing, `null` or non-string value
/// reaches the handler and fails validation with the usual message instead of
/// a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlRequest {
    #[serde(default)]
    pub query: Option<JsonValue>,
}

impl SqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(JsonValue::String(query.into())),
        }
    }

    /// The statement text, if `query` is a JSON string.
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_ref().and_then(JsonValue::as_str)
    }

    pub fn into_query_text(self) -> Option<String> {
        match self.query {
            Some(JsonValue::String(text)) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_query() {
        let request: SqlRequest = serde_json::from_str(r#"{"query": "SELECT 1"}"#).unwrap();
        assert_eq!(request.query_text(), Some("SELECT 1"));
        assert_eq!(request.into_query_text().as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn test_missing_or_non_string_query() {
        for body in [r#"{}"#, r#"{"query": null}"#, r#"{"query": 42}"#, r#"{"query": ["SELECT 1"]}"#] {
            let request: SqlRequest = serde_json::from_str(body).unwrap();
            assert!(request.query_text().is_none(), "{body}");
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let request: SqlRequest =
            serde_json::from_str(r#"{"query": "SELECT 1", "sql": "DROP TABLE users"}"#).unwrap();
        assert_eq!(request.query_text(), Some("SELECT 1"));
    }
}
