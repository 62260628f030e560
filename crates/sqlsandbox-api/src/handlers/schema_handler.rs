use actix_web::{get, web, HttpResponse, Responder};
use sqlsandbox_core::SqlSandbox;
use std::sync::Arc;

use super::response::{blocking_failure, error_response};

/// GET /api/schema - Describe every table with its columns and foreign keys
#[get("/schema")]
pub async fn get_schema(sandbox: web::Data<Arc<SqlSandbox>>) -> impl Responder {
    let sandbox = Arc::clone(sandbox.get_ref());

    match web::block(move || sandbox.schema()).await {
        Ok(Ok(schema)) => HttpResponse::Ok().json(schema),
        Ok(Err(err)) => error_response(&err),
        Err(err) => blocking_failure(err),
    }
}
