//! Application route wiring shared by the server and the HTTP tests.

use actix_files::Files;
use actix_web::web;
use log::debug;

/// API routes only.
pub fn configure(cfg: &mut web::ServiceConfig) {
    sqlsandbox_api::configure_routes(cfg);
}

/// Serve the static UI bundle at `/`. Must be registered after the API scope,
/// since `/` would otherwise shadow it.
pub fn configure_ui_routes(cfg: &mut web::ServiceConfig, ui_path: &str) {
    debug!("Serving static UI from {}", ui_path);
    cfg.service(Files::new("/", ui_path).index_file("index.html"));
}
