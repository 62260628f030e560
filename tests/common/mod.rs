//! Shared helpers for the HTTP tests.

#![allow(dead_code)]

use actix_web::test::TestRequest;
use sqlsandbox_configs::ServerConfig;
use sqlsandbox_core::SqlSandbox;
use std::sync::Arc;

/// Fixed RNG seed so sample data is identical across runs.
pub const TEST_RNG_SEED: u64 = 2024;

pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.seed.rng_seed = Some(TEST_RNG_SEED);
    config
}

pub fn seeded_sandbox() -> Arc<SqlSandbox> {
    Arc::new(SqlSandbox::from_config(&test_config()).expect("seed sandbox"))
}

/// Build the full application (middleware, JSON config, routes) around a
/// sandbox, the way the server wires it.
macro_rules! init_app {
    ($sandbox:expr) => {
        init_app!($sandbox, crate::common::test_config())
    };
    ($sandbox:expr, $config:expr) => {{
        let config = $config;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(sqlsandbox_server::middleware::request_logger())
                .wrap(sqlsandbox_server::middleware::build_cors_from_config(&config))
                .app_data(sqlsandbox_api::json_config(config.limits.max_body_size))
                .app_data(actix_web::web::Data::new($sandbox))
                .configure(sqlsandbox_server::routes::configure),
        )
        .await
    }};
}

/// POST /api/execute-sql with `{"query": <sql>}`.
pub fn execute_request(sql: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/execute-sql")
        .set_json(serde_json::json!({ "query": sql }))
}
