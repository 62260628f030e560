//! Statement classification and the destructive-statement guard.
//!
//! Both checks are syntactic. The guard matches whole words only, so a column
//! named `truncated` passes, but it is not a parser: comment obfuscation such
//! as `DR/**/OP` is not caught. Statement batching (`SELECT 1; DROP TABLE x`)
//! is caught only when a denied keyword appears in the text, and the engine's
//! single-statement prepare rejects the batch anyway.

use crate::error::{Result, SandboxError};
use regex::Regex;

/// Keywords rejected when no explicit list is configured.
pub const DEFAULT_DENIED_KEYWORDS: [&str; 5] =
    ["drop", "delete", "truncate", "alter table", "pragma writable_schema"];

/// Prefix-based split between row-producing and mutating statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `SELECT ...` or `PRAGMA ...`: materialize the row set
    Read,
    /// Anything else: run to completion and report affected rows
    Write,
}

impl StatementKind {
    pub fn classify(sql: &str) -> Self {
        let normalized = sql.trim().to_lowercase();
        if normalized.starts_with("select") || normalized.starts_with("pragma") {
            StatementKind::Read
        } else {
            StatementKind::Write
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Read => "read",
            StatementKind::Write => "write",
        }
    }
}

/// Denylist of keywords, matched case-insensitively as whole words.
#[derive(Debug, Clone)]
pub struct StatementGuard {
    pattern: Option<Regex>,
    keywords: Vec<String>,
}

impl StatementGuard {
    /// Build a guard from plain keywords. Multi-word entries such as
    /// `alter table` match any run of whitespace between the words.
    pub fn new<I, S>(keywords: I) -> std::result::Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| k.split_whitespace().map(regex::escape).collect::<Vec<_>>().join(r"\s+"))
            .collect();

        // An empty alternation would match everything.
        let pattern = if alternatives.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))?)
        };

        Ok(Self { pattern, keywords })
    }

    /// True when the text contains any denied keyword as a whole word.
    pub fn is_disallowed(&self, sql: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(sql))
    }

    /// Allow/deny decision as a `Result` for `?` chaining.
    pub fn check(&self, sql: &str) -> Result<()> {
        if self.is_disallowed(sql) {
            Err(SandboxError::PolicyViolation)
        } else {
            Ok(())
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for StatementGuard {
    fn default() -> Self {
        // Built from escaped literals, so compilation cannot fail.
        Self::new(DEFAULT_DENIED_KEYWORDS).expect("default guard pattern is valid")
    }
}
