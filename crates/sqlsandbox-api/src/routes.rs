//! API routes configuration
//!
//! This module configures all HTTP routes for the sandbox API.

use crate::handlers;
use crate::models::ErrorResponse;
use actix_web::{error, web, HttpResponse};

/// Configure API routes
///
/// All endpoints live under the /api prefix:
/// - POST /api/execute-sql - Execute one guarded SQL statement
/// - GET /api/schema - Describe tables, columns and foreign keys
/// - GET /api/practice/questions - List practice questions
/// - GET /api/practice/questions/{id}/solution - Model solution of a question
/// - POST /api/practice/questions/{id}/check - Check an answer
/// - GET /api/healthcheck - Health check endpoint
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::execute_sql)
            .service(handlers::get_schema)
            .service(
                web::scope("/practice")
                    .service(handlers::list_questions)
                    .service(handlers::question_solution)
                    .service(handlers::check_answer),
            )
            .route("/healthcheck", web::get().to(handlers::healthcheck_handler)),
    );
}

/// JSON extractor settings: body size limit and a `{error}` body for
/// payloads that cannot be parsed.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid JSON payload: {}", err)));
        error::InternalError::from_response(err, response).into()
    })
}
