use clap::Parser;
use std::path::PathBuf;

/// SQL Sandbox - interactive SQL learning server
#[derive(Parser, Debug)]
#[command(name = "sqlsandbox-server")]
#[command(version)]
#[command(about = "Serves a seeded in-memory SQLite database over a guarded SQL API", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file. A missing file falls back to
    /// defaults plus environment overrides.
    #[arg(short = 'c', long = "config", default_value = "config.toml", env = "SQLSANDBOX_CONFIG")]
    pub config: PathBuf,
}
