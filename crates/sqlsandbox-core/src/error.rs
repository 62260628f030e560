//! Error types for sqlsandbox-core

use thiserror::Error;

/// Message returned when the request carries no SQL text.
pub const QUERY_REQUIRED_MESSAGE: &str = "Query is required";

/// Message returned when the statement guard rejects a query.
pub const POLICY_VIOLATION_MESSAGE: &str =
    "Harmful operations like DROP, DELETE, TRUNCATE are not allowed in this learning environment";

/// Errors produced by the sandbox. Every variant is terminal for the request
/// that caused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SandboxError {
    /// Missing or unusable input
    #[error("{0}")]
    Validation(String),

    /// The statement matched the denylist
    #[error("{}", POLICY_VIOLATION_MESSAGE)]
    PolicyViolation,

    /// The engine rejected the statement; carries the engine message verbatim
    #[error("{0}")]
    Execution(String),

    /// Reading the catalog failed
    #[error("{0}")]
    Catalog(String),

    /// A requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Building the sample database failed at boot
    #[error("Seed error: {0}")]
    Seed(String),
}

impl SandboxError {
    pub fn missing_query() -> Self {
        SandboxError::Validation(QUERY_REQUIRED_MESSAGE.to_string())
    }

    pub fn execution(err: rusqlite::Error) -> Self {
        SandboxError::Execution(err.to_string())
    }

    pub fn catalog(err: rusqlite::Error) -> Self {
        SandboxError::Catalog(err.to_string())
    }

    pub fn seed(err: rusqlite::Error) -> Self {
        SandboxError::Seed(err.to_string())
    }

    /// HTTP status this error maps to at the request boundary
    pub fn status_code(&self) -> u16 {
        match self {
            SandboxError::Validation(_) => 400,
            SandboxError::PolicyViolation => 403,
            SandboxError::Execution(_) => 400,
            SandboxError::NotFound(_) => 404,
            SandboxError::Catalog(_) | SandboxError::Seed(_) => 500,
        }
    }
}

/// Result type for sandbox operations
pub type Result<T> = std::result::Result<T, SandboxError>;
