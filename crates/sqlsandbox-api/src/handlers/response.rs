//! Mapping from sandbox errors to HTTP responses

use crate::models::ErrorResponse;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::error;
use sqlsandbox_core::SandboxError;

/// `{error}` body with the status the error maps to.
pub fn error_response(err: &SandboxError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse::new(err.to_string()))
}

/// The blocking pool dropped the task (worker panic or shutdown).
pub fn blocking_failure(err: BlockingError) -> HttpResponse {
    error!("Blocking task failed: {}", err);
    HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error"))
}
