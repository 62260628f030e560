//! sqlsandbox-configs
//!
//! Server configuration types and loader for the SQL sandbox.

pub mod config;

pub use config::defaults;
pub use config::*;
