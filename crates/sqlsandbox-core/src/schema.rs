//! Schema introspection over the SQLite catalog.
//!
//! Recomputed on every call: the schema is static after seeding and the table
//! count is small.

use crate::error::{Result, SandboxError};
use indexmap::IndexMap;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

const LIST_TABLES_SQL: &str =
    "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'";
const TABLE_COLUMNS_SQL: &str = "SELECT name, type, pk FROM pragma_table_info(?1) ORDER BY cid";
const FOREIGN_KEYS_SQL: &str =
    r#"SELECT "from", "table", "to" FROM pragma_foreign_key_list(?1) ORDER BY id, seq"#;

/// `{tables: {<name>: {columns, foreignKeys}}}`, tables in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    pub tables: IndexMap<String, TableSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub columns: Vec<ColumnInfo>,
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type as written in the DDL (may be empty)
    #[serde(rename = "type")]
    pub data_type: String,
    #[serde(rename = "isPrimary")]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub column: String,
    pub reference: ForeignKeyReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyReference {
    pub table: String,
    /// `None` when the constraint references the parent's primary key implicitly
    pub column: Option<String>,
}

impl DatabaseSchema {
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }
}

/// Describe every user table; engine-internal `sqlite_*` tables are skipped.
pub fn introspect(conn: &Connection) -> Result<DatabaseSchema> {
    read_schema(conn).map_err(SandboxError::catalog)
}

fn read_schema(conn: &Connection) -> rusqlite::Result<DatabaseSchema> {
    let mut list_tables = conn.prepare(LIST_TABLES_SQL)?;
    let names = list_tables
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut columns_stmt = conn.prepare(TABLE_COLUMNS_SQL)?;
    let mut foreign_keys_stmt = conn.prepare(FOREIGN_KEYS_SQL)?;

    let mut tables = IndexMap::with_capacity(names.len());
    for name in names {
        let columns = columns_stmt
            .query_map(params![name], |row| {
                Ok(ColumnInfo {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                    is_primary: row.get::<_, i64>(2)? == 1,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let foreign_keys = foreign_keys_stmt
            .query_map(params![name], |row| {
                Ok(ForeignKey {
                    column: row.get(0)?,
                    reference: ForeignKeyReference {
                        table: row.get(1)?,
                        column: row.get(2)?,
                    },
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tables.insert(name, TableSchema { columns, foreign_keys });
    }

    Ok(DatabaseSchema { tables })
}
