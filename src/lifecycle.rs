//! Server lifecycle management helpers.
//!
//! Bootstrapping the seeded sandbox, wiring the HTTP server, and
//! coordinating graceful shutdown.

use crate::{middleware, routes};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use log::{debug, info};
use sqlsandbox_configs::ServerConfig;
use sqlsandbox_core::SqlSandbox;
use std::sync::Arc;
use std::time::Instant;

/// Open the in-memory store, seed it and build the statement guard.
///
/// Runs before the server binds, so the first request always sees a fully
/// seeded database.
pub fn bootstrap(config: &ServerConfig) -> Result<Arc<SqlSandbox>> {
    let phase_start = Instant::now();
    let sandbox = SqlSandbox::from_config(config).context("Failed to initialize sandbox database")?;

    info!(
        "Sandbox ready ({:.2}ms), statement timeout: {}",
        phase_start.elapsed().as_secs_f64() * 1000.0,
        match sandbox.store().statement_timeout() {
            Some(timeout) => format!("{}ms", timeout.as_millis()),
            None => "disabled".to_string(),
        }
    );

    Ok(Arc::new(sandbox))
}

/// Run the HTTP server until it stops or Ctrl+C is received.
pub async fn run(config: &ServerConfig, sandbox: Arc<SqlSandbox>) -> Result<()> {
    let main_start = Instant::now();
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let ui_path = config.server.ui_path.clone();
    let max_body_size = config.limits.max_body_size;
    let cors_config = config.clone();

    if let Some(ref path) = ui_path {
        info!("Static UI enabled from {}", path);
    }

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(sqlsandbox_api::json_config(max_body_size))
            .app_data(web::Data::new(sandbox.clone()))
            .configure(routes::configure);

        if let Some(ref path) = ui_path {
            let path = path.clone();
            app = app.configure(move |cfg| routes::configure_ui_routes(cfg, &path));
        }

        app
    })
    .workers(if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run();

    info!(
        "🚀 Server listening on http://{} (started in {:.2}ms)",
        bind_addr,
        main_start.elapsed().as_secs_f64() * 1000.0
    );

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => log::error!("Server error: {}", e),
                Err(e) => log::error!("Server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
