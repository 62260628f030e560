//! The relational store: one in-memory SQLite connection shared by every request.
//!
//! SQLite executes one statement at a time per connection, so the connection
//! sits behind a mutex and callers are serialized at this boundary.

use crate::error::{Result, SandboxError};
use log::debug;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::time::{Duration, Instant};

/// Number of VM instructions between deadline checks while a statement runs.
const PROGRESS_HANDLER_OPS: i32 = 1000;

#[derive(Debug)]
pub struct SandboxStore {
    conn: Mutex<Connection>,
    statement_timeout: Option<Duration>,
}

impl SandboxStore {
    /// Open an empty in-memory database with foreign keys enforced.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(SandboxError::seed)?;
        conn.pragma_update(None, "foreign_keys", true).map_err(SandboxError::seed)?;
        debug!("Opened in-memory SQLite database (foreign_keys=ON)");

        Ok(Self {
            conn: Mutex::new(conn),
            statement_timeout: None,
        })
    }

    /// Bound the wall-clock time of each user statement. `None` or a zero
    /// duration disables the bound.
    pub fn with_statement_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.statement_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout
    }

    /// Run a user statement with exclusive access to the connection.
    ///
    /// When a statement timeout is configured the engine's progress handler
    /// interrupts the statement once the deadline passes; the interruption
    /// surfaces through `f` as an ordinary engine error.
    pub fn run_statement<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Connection) -> T,
    {
        let conn = self.conn.lock();

        match self.statement_timeout {
            Some(timeout) => {
                let deadline = Instant::now() + timeout;
                conn.progress_handler(PROGRESS_HANDLER_OPS, Some(move || Instant::now() > deadline));
                let result = f(&conn);
                conn.progress_handler(0, None::<fn() -> bool>);
                result
            }
            None => f(&conn),
        }
    }

    /// Run catalog or maintenance work with exclusive access to the connection.
    pub fn with_connection<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Connection) -> T,
    {
        let conn = self.conn.lock();
        f(&conn)
    }
}

/// True when the engine aborted a statement through the progress handler.
pub fn is_interrupt_error(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ErrorCode::OperationInterrupted,
                ..
            },
            _
        )
    )
}
