use crate::models::HealthResponse;
use actix_web::{HttpResponse, Responder};

/// GET /api/healthcheck - Liveness check, no store access
pub async fn healthcheck_handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
