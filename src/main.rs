//! SQL Sandbox Server entrypoint
//!
//! Initialization, middleware wiring and graceful shutdown live in dedicated
//! modules so this file remains a thin orchestrator.

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use sqlsandbox_configs::ServerConfig;
use sqlsandbox_server::cli::Cli;
use sqlsandbox_server::lifecycle::{bootstrap, run};
use sqlsandbox_server::logging;

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration (fallback to defaults when config file missing)
    let config_missing = !cli.config.exists();
    let config = if config_missing {
        ServerConfig::from_env()?
    } else {
        match ServerConfig::from_file(&cli.config) {
            Ok(cfg) => {
                eprintln!(
                    "✅ Loaded config from: {}",
                    std::fs::canonicalize(&cli.config)
                        .unwrap_or_else(|_| cli.config.clone())
                        .display()
                );
                cfg
            }
            Err(e) => {
                eprintln!("❌ FATAL: Failed to load {}: {:#}", cli.config.display(), e);
                std::process::exit(1);
            }
        }
    };

    // Logging before any other side effects
    logging::init_logging(&config.logging)?;

    if config_missing {
        warn!(
            "Config file {} not found, using defaults and environment overrides",
            cli.config.display()
        );
    }

    info!("SQL Sandbox Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    // Seed the in-memory database before accepting requests
    let sandbox = bootstrap(&config)?;

    // Run HTTP server until termination signal is received
    run(&config, sandbox).await
}
