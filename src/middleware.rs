//! Server-wide middleware configuration helpers.
//!
//! Applied in order: CORS (via actix-cors), then the request logger.

use actix_cors::Cors;
use actix_web::middleware;
use log::debug;
use sqlsandbox_configs::ServerConfig;

/// Build CORS middleware from server configuration using actix-cors.
///
/// An empty origin list or `"*"` allows any origin, matching a bare `cors()`
/// setup; methods and headers are always permissive.
pub fn build_cors_from_config(config: &ServerConfig) -> Cors {
    let cors_config = &config.security.cors;

    let mut cors = Cors::default().allow_any_method().allow_any_header();

    if cors_config.allowed_origins.is_empty() || cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
        debug!("CORS: Allowing any origin");
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: Allowed origins: {:?}", cors_config.allowed_origins);
    }

    cors.max_age(cors_config.max_age as usize)
}

/// Build the request logger middleware.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new(r#"%a "%r" %s %b %Dms"#)
}
