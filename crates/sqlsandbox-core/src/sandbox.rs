//! Entry point used by the request boundary.

use crate::envelope::{normalize, ExecutionEnvelope};
use crate::error::{Result, SandboxError};
use crate::executor;
use crate::guard::{StatementGuard, StatementKind};
use crate::schema::{self, DatabaseSchema};
use crate::seed::seed_database;
use crate::store::SandboxStore;
use log::{debug, error, warn};
use sqlsandbox_configs::ServerConfig;
use std::time::{Duration, Instant};

/// Longest statement prefix written to the log.
const LOG_PREVIEW_CHARS: usize = 120;

/// The seeded store together with the guard that fronts it.
///
/// Constructed once at boot and shared by reference with every handler.
#[derive(Debug)]
pub struct SqlSandbox {
    store: SandboxStore,
    guard: StatementGuard,
}

impl SqlSandbox {
    pub fn new(store: SandboxStore, guard: StatementGuard) -> Self {
        Self { store, guard }
    }

    /// Open the in-memory store, seed it and build the guard from `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let timeout = match config.limits.statement_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };
        let store = SandboxStore::open_in_memory()?.with_statement_timeout(timeout);
        seed_database(&store, &config.seed)?;

        let guard = StatementGuard::new(&config.guard.denied_keywords)
            .map_err(|e| SandboxError::Validation(format!("Invalid guard keyword list: {}", e)))?;
        debug!("Statement guard denies: {:?}", guard.keywords());

        Ok(Self::new(store, guard))
    }

    /// Validate, guard, execute and normalize one statement.
    ///
    /// `None` and blank text fail with the "Query is required" validation
    /// error before the guard runs.
    pub fn execute(&self, query: Option<&str>) -> Result<ExecutionEnvelope> {
        let sql = query
            .map(str::trim)
            .filter(|sql| !sql.is_empty())
            .ok_or_else(SandboxError::missing_query)?;

        if let Err(e) = self.guard.check(sql) {
            warn!("Rejected statement by guard: {}", preview(sql));
            return Err(e);
        }

        let kind = StatementKind::classify(sql);
        let (outcome, elapsed) = self.store.run_statement(|conn| {
            let start = Instant::now();
            let outcome = executor::execute(conn, sql, kind);
            (outcome, start.elapsed())
        });

        match outcome {
            Ok(outcome) => {
                let envelope = normalize(outcome, elapsed);
                debug!(
                    "Executed {} statement in {}ms ({} row(s)): {}",
                    kind.as_str(),
                    envelope.metadata.execution_time,
                    envelope.row_count(),
                    preview(sql)
                );
                Ok(envelope)
            }
            Err(e) => {
                warn!("SQL execution error: {} [{}]", e, preview(sql));
                Err(e)
            }
        }
    }

    /// Describe every user table of the store.
    pub fn schema(&self) -> Result<DatabaseSchema> {
        self.store.with_connection(schema::introspect).inspect_err(|e| {
            error!("Schema introspection failed: {}", e);
        })
    }

    pub fn guard(&self) -> &StatementGuard {
        &self.guard
    }

    pub fn store(&self) -> &SandboxStore {
        &self.store
    }
}

fn preview(sql: &str) -> String {
    let mut chars = sql.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
