//! sqlsandbox-core
//!
//! Guarded SQL execution against the in-memory sample database, plus the
//! read paths around it (schema introspection and the practice question bank).
//!
//! Request flow: [`SqlSandbox::execute`] validates the text, runs it past the
//! [`StatementGuard`], hands it to the [`executor`] under the store lock and
//! turns the raw outcome into an [`ExecutionEnvelope`].

pub mod envelope;
pub mod error;
pub mod executor;
pub mod guard;
pub mod practice;
pub mod sandbox;
pub mod schema;
pub mod seed;
pub mod store;
pub mod value;

pub use envelope::{CellRef, EnvelopeMetadata, ExecutionEnvelope};
pub use error::{Result, SandboxError};
pub use executor::RawOutcome;
pub use guard::{StatementGuard, StatementKind};
pub use practice::{AnswerFeedback, Difficulty, PracticeQuestion};
pub use sandbox::SqlSandbox;
pub use schema::{ColumnInfo, DatabaseSchema, ForeignKey, ForeignKeyReference, TableSchema};
pub use seed::SeedSummary;
pub use store::SandboxStore;
pub use value::{Record, ScalarValue};
