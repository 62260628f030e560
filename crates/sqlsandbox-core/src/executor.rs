//! Runs one guarded statement against the store connection.

use crate::error::{Result, SandboxError};
use crate::guard::StatementKind;
use crate::store::is_interrupt_error;
use crate::value::{Record, ScalarValue};
use log::warn;
use rusqlite::{Batch, Connection, Statement};

const NO_STATEMENT_MESSAGE: &str = "The supplied SQL string contains no statements";
const MULTIPLE_STATEMENTS_MESSAGE: &str = "Multiple statements provided";

/// What the engine produced, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutcome {
    /// Fully materialized row set of a read statement
    Rows(Vec<Record>),
    /// Affected-row count of a write statement
    Changes(u64),
}

/// Execute `sql` on `conn` following the read or write path for `kind`.
///
/// Engine errors (syntax, constraint violations, unknown tables, interrupted
/// statements) come back as [`SandboxError::Execution`] with the engine's
/// message unchanged. Nothing is retried.
pub fn execute(conn: &Connection, sql: &str, kind: StatementKind) -> Result<RawOutcome> {
    let mut stmt = prepare_single(conn, sql.trim())?;
    let outcome = match kind {
        StatementKind::Read => query_rows(&mut stmt).map(RawOutcome::Rows),
        StatementKind::Write => execute_write(conn, &mut stmt).map(RawOutcome::Changes),
    };
    outcome.map_err(|e| {
        if is_interrupt_error(&e) {
            warn!("Statement interrupted after exceeding the statement timeout");
        }
        SandboxError::execution(e)
    })
}

/// Prepare exactly one statement; trailing whitespace and comments are fine,
/// a second statement is not.
fn prepare_single<'conn>(conn: &'conn Connection, sql: &str) -> Result<Statement<'conn>> {
    let mut batch = Batch::new(conn, sql);
    let stmt = batch
        .next()
        .map_err(SandboxError::execution)?
        .ok_or_else(|| SandboxError::Execution(NO_STATEMENT_MESSAGE.to_string()))?;

    if batch.next().map_err(SandboxError::execution)?.is_some() {
        return Err(SandboxError::Execution(MULTIPLE_STATEMENTS_MESSAGE.to_string()));
    }

    Ok(stmt)
}

/// Materialize every row, keyed by output column name.
///
/// Duplicate output names collapse into one key that keeps its first position
/// and holds the last value.
fn query_rows(stmt: &mut Statement<'_>) -> rusqlite::Result<Vec<Record>> {
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Record::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            record.insert(name.clone(), ScalarValue::from(row.get_ref(idx)?));
        }
        records.push(record);
    }

    Ok(records)
}

/// Step the statement to completion, discarding any rows it yields, and
/// return the number of rows it modified.
///
/// `changes()` keeps the count of the last INSERT/UPDATE/DELETE, so it is only
/// trusted when `total_changes()` moved while this statement ran.
fn execute_write(conn: &Connection, stmt: &mut Statement<'_>) -> rusqlite::Result<u64> {
    let before = conn.total_changes();
    {
        let mut rows = stmt.query([])?;
        while rows.next()?.is_some() {}
    }
    if conn.total_changes() == before {
        Ok(0)
    } else {
        Ok(conn.changes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE categories (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
             INSERT INTO categories (name) VALUES ('Books'), ('Games'), ('Music');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_read_materializes_all_rows() {
        let conn = fixture();
        let outcome = execute(&conn, "SELECT * FROM categories", StatementKind::Read).unwrap();
        let RawOutcome::Rows(rows) = outcome else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("id"), Some(&ScalarValue::Integer(1)));
        assert_eq!(rows[2].get("name"), Some(&ScalarValue::Text("Music".to_string())));
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_read_respects_caller_limit_only() {
        let conn = fixture();
        let outcome = execute(&conn, "SELECT name FROM categories LIMIT 2;", StatementKind::Read).unwrap();
        assert!(matches!(outcome, RawOutcome::Rows(ref rows) if rows.len() == 2));
    }

    #[test]
    fn test_read_empty_result() {
        let conn = fixture();
        let outcome =
            execute(&conn, "SELECT * FROM categories WHERE id > 100", StatementKind::Read).unwrap();
        assert_eq!(outcome, RawOutcome::Rows(Vec::new()));
    }

    #[test]
    fn test_duplicate_column_names_collapse() {
        let conn = fixture();
        let outcome = execute(&conn, "SELECT 1 AS v, 2 AS v", StatementKind::Read).unwrap();
        let RawOutcome::Rows(rows) = outcome else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("v"), Some(&ScalarValue::Integer(2)));
    }

    #[test]
    fn test_pragma_is_read() {
        let conn = fixture();
        let outcome = execute(&conn, "PRAGMA table_info(categories)", StatementKind::Read).unwrap();
        let RawOutcome::Rows(rows) = outcome else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some(&ScalarValue::Text("name".to_string())));
    }

    #[test]
    fn test_write_reports_changes() {
        let conn = fixture();
        let outcome = execute(
            &conn,
            "INSERT INTO categories (name) VALUES ('Toys');",
            StatementKind::Write,
        )
        .unwrap();
        assert_eq!(outcome, RawOutcome::Changes(1));

        let outcome =
            execute(&conn, "UPDATE categories SET name = upper(name)", StatementKind::Write).unwrap();
        assert_eq!(outcome, RawOutcome::Changes(4));
    }

    #[test]
    fn test_write_path_tolerates_row_producing_statements() {
        let conn = fixture();
        let outcome = execute(
            &conn,
            "WITH c AS (SELECT * FROM categories) SELECT * FROM c",
            StatementKind::Write,
        )
        .unwrap();
        assert_eq!(outcome, RawOutcome::Changes(0));
    }

    #[test]
    fn test_non_dml_after_dml_reports_zero_changes() {
        let conn = fixture();
        let outcome =
            execute(&conn, "UPDATE categories SET name = name", StatementKind::Write).unwrap();
        assert_eq!(outcome, RawOutcome::Changes(3));

        for sql in [
            "CREATE TABLE scratch (x INTEGER)",
            "CREATE INDEX idx_categories_name ON categories (name)",
            "WITH c AS (SELECT 1) SELECT * FROM c",
            "BEGIN",
            "COMMIT",
        ] {
            let outcome = execute(&conn, sql, StatementKind::Write).unwrap();
            assert_eq!(outcome, RawOutcome::Changes(0), "{sql}");
        }

        let outcome = execute(&conn, "DELETE FROM categories WHERE id = 1", StatementKind::Write).unwrap();
        assert_eq!(outcome, RawOutcome::Changes(1));
    }

    #[test]
    fn test_dml_matching_no_rows_reports_zero_changes() {
        let conn = fixture();
        execute(&conn, "UPDATE categories SET name = name", StatementKind::Write).unwrap();
        let outcome =
            execute(&conn, "DELETE FROM categories WHERE id > 100", StatementKind::Write).unwrap();
        assert_eq!(outcome, RawOutcome::Changes(0));
    }

    #[test]
    fn test_unknown_table_message_is_verbatim() {
        let conn = fixture();
        let err = execute(&conn, "SELECT * FROM nonexistent;", StatementKind::Read).unwrap_err();
        assert_eq!(err, SandboxError::Execution("no such table: nonexistent".to_string()));
    }

    #[test]
    fn test_constraint_violation() {
        let conn = fixture();
        let err = execute(&conn, "INSERT INTO categories (name) VALUES (NULL)", StatementKind::Write)
            .unwrap_err();
        match err {
            SandboxError::Execution(msg) => assert!(msg.contains("NOT NULL"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error() {
        let conn = fixture();
        let err = execute(&conn, "SELEC * FROM categories", StatementKind::Write).unwrap_err();
        assert!(matches!(err, SandboxError::Execution(ref msg) if msg.contains("syntax error")));
    }

    #[test]
    fn test_trailing_comment_is_allowed() {
        let conn = fixture();
        let outcome =
            execute(&conn, "SELECT name FROM categories; -- done", StatementKind::Read).unwrap();
        assert!(matches!(outcome, RawOutcome::Rows(ref rows) if rows.len() == 3));
    }

    #[test]
    fn test_comment_only_text_is_rejected() {
        let conn = fixture();
        let err = execute(&conn, "-- nothing here", StatementKind::Write).unwrap_err();
        assert_eq!(err, SandboxError::Execution(NO_STATEMENT_MESSAGE.to_string()));
    }

    #[test]
    fn test_multiple_statements_rejected() {
        let conn = fixture();
        let err = execute(
            &conn,
            "INSERT INTO categories (name) VALUES ('A'); INSERT INTO categories (name) VALUES ('B')",
            StatementKind::Write,
        )
        .unwrap_err();
        assert_eq!(err, SandboxError::Execution(MULTIPLE_STATEMENTS_MESSAGE.to_string()));

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
    }
}
