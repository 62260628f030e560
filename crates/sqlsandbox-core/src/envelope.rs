//! The uniform response envelope and the normalizer that builds it.

use crate::executor::RawOutcome;
use crate::value::{Record, ScalarValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Single column reported for write statements.
pub const WRITE_RESULT_COLUMN: &str = "Result";

/// `{columns, rows, metadata}`, identical in shape for every statement kind.
///
/// # Example (read)
/// ```json
/// {
///   "columns": ["id", "name"],
///   "rows": [{"id": 1, "name": "Electronics"}],
///   "metadata": {"executionTime": 0, "highlightedRows": [], "highlightedCells": []}
/// }
/// ```
///
/// # Example (write)
/// ```json
/// {
///   "columns": ["Result"],
///   "rows": [{"Result": "Query executed successfully. 1 row(s) affected."}],
///   "metadata": {"executionTime": 0, "changes": 1}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionEnvelope {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
    pub metadata: EnvelopeMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeMetadata {
    /// Wall-clock execution time, rounded to whole milliseconds
    pub execution_time: u64,

    /// Reserved for result diffing; always empty on reads, absent on writes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_rows: Option<Vec<usize>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted_cells: Option<Vec<CellRef>>,

    /// Affected-row count, present on writes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl ExecutionEnvelope {
    /// Envelope for a read: columns come from the first row's keys, so an
    /// empty row set reports no columns.
    pub fn from_rows(rows: Vec<Record>, elapsed: Duration) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        Self {
            columns,
            rows,
            metadata: EnvelopeMetadata {
                execution_time: round_millis(elapsed),
                highlighted_rows: Some(Vec::new()),
                highlighted_cells: Some(Vec::new()),
                changes: None,
            },
        }
    }

    /// Envelope for a write: one synthetic `Result` row describing the effect.
    pub fn from_changes(changes: u64, elapsed: Duration) -> Self {
        let mut row = Record::with_capacity(1);
        row.insert(
            WRITE_RESULT_COLUMN.to_string(),
            ScalarValue::Text(format!("Query executed successfully. {} row(s) affected.", changes)),
        );

        Self {
            columns: vec![WRITE_RESULT_COLUMN.to_string()],
            rows: vec![row],
            metadata: EnvelopeMetadata {
                execution_time: round_millis(elapsed),
                highlighted_rows: None,
                highlighted_cells: None,
                changes: Some(changes),
            },
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Turn a raw executor outcome into the response envelope.
pub fn normalize(outcome: RawOutcome, elapsed: Duration) -> ExecutionEnvelope {
    match outcome {
        RawOutcome::Rows(rows) => ExecutionEnvelope::from_rows(rows, elapsed),
        RawOutcome::Changes(changes) => ExecutionEnvelope::from_changes(changes, elapsed),
    }
}

/// Round a duration to the nearest whole millisecond.
pub fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, ScalarValue)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_read_columns_follow_first_row() {
        let rows = vec![
            record(&[("id", 1i64.into()), ("name", "Alice".into())]),
            record(&[("id", 2i64.into()), ("name", "Bob".into())]),
        ];
        let envelope = normalize(RawOutcome::Rows(rows), Duration::from_millis(3));

        assert_eq!(envelope.columns, vec!["id", "name"]);
        assert_eq!(envelope.row_count(), 2);
        assert_eq!(envelope.metadata.execution_time, 3);
        assert_eq!(envelope.metadata.highlighted_rows, Some(Vec::new()));
        assert_eq!(envelope.metadata.highlighted_cells, Some(Vec::new()));
        assert_eq!(envelope.metadata.changes, None);
    }

    #[test]
    fn test_empty_read_has_no_columns() {
        let envelope = normalize(RawOutcome::Rows(Vec::new()), Duration::ZERO);
        assert!(envelope.columns.is_empty());
        assert!(envelope.rows.is_empty());
    }

    #[test]
    fn test_write_envelope() {
        let envelope = normalize(RawOutcome::Changes(3), Duration::from_micros(1600));

        assert_eq!(envelope.columns, vec!["Result"]);
        assert_eq!(envelope.row_count(), 1);
        assert_eq!(
            envelope.rows[0].get("Result").and_then(ScalarValue::as_str),
            Some("Query executed successfully. 3 row(s) affected.")
        );
        assert_eq!(envelope.metadata.changes, Some(3));
        assert_eq!(envelope.metadata.execution_time, 2);
    }

    #[test]
    fn test_read_wire_shape() {
        let rows = vec![record(&[("id", 1i64.into()), ("email", ScalarValue::Null)])];
        let envelope = normalize(RawOutcome::Rows(rows), Duration::ZERO);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "columns": ["id", "email"],
                "rows": [{"id": 1, "email": null}],
                "metadata": {"executionTime": 0, "highlightedRows": [], "highlightedCells": []}
            })
        );
    }

    #[test]
    fn test_write_wire_shape() {
        let envelope = normalize(RawOutcome::Changes(0), Duration::ZERO);

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "columns": ["Result"],
                "rows": [{"Result": "Query executed successfully. 0 row(s) affected."}],
                "metadata": {"executionTime": 0, "changes": 0}
            })
        );
    }

    #[test]
    fn test_round_millis() {
        assert_eq!(round_millis(Duration::from_micros(400)), 0);
        assert_eq!(round_millis(Duration::from_micros(500)), 1);
        assert_eq!(round_millis(Duration::from_micros(2499)), 2);
    }
}
