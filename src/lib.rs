//! SQL Sandbox Server Library
//!
//! This library exposes server modules for integration testing.

pub mod cli;
pub mod lifecycle;
pub mod logging;
pub mod middleware;
pub mod routes;
