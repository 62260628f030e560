//! SQL execution handler for the `/api/execute-sql` endpoint

use actix_web::{post, web, HttpResponse, Responder};
use sqlsandbox_core::SqlSandbox;
use std::sync::Arc;

use super::response::{blocking_failure, error_response};
use crate::models::SqlRequest;

/// POST /api/execute-sql - Execute one SQL statement
///
/// # Example Request
/// ```json
/// {
///   "query": "INSERT INTO categories (name) VALUES ('Toys');"
/// }
/// ```
///
/// # Example Response (Success)
/// ```json
/// {
///   "columns": ["Result"],
///   "rows": [{"Result": "Query executed successfully. 1 row(s) affected."}],
///   "metadata": {"executionTime": 0, "changes": 1}
/// }
/// ```
///
/// # Example Response (Error)
/// ```json
/// {
///   "error": "no such table: nonexistent"
/// }
/// ```
///
/// Missing or blank `query` is 400, a denied keyword is 403, an engine error
/// is 400 with the engine's message.
#[post("/execute-sql")]
pub async fn execute_sql(
    req: web::Json<SqlRequest>,
    sandbox: web::Data<Arc<SqlSandbox>>,
) -> impl Responder {
    let query = req.into_inner().into_query_text();
    let sandbox = Arc::clone(sandbox.get_ref());

    match web::block(move || sandbox.execute(query.as_deref())).await {
        Ok(Ok(envelope)) => HttpResponse::Ok().json(envelope),
        Ok(Err(err)) => error_response(&err),
        Err(err) => blocking_failure(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use sqlsandbox_configs::ServerConfig;

    fn sandbox() -> Arc<SqlSandbox> {
        let mut config = ServerConfig::default();
        config.seed.rng_seed = Some(11);
        Arc::new(SqlSandbox::from_config(&config).unwrap())
    }

    #[actix_rt::test]
    async fn test_execute_select() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(sandbox()))
                .service(execute_sql),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/execute-sql")
            .set_json(SqlRequest::new("SELECT id, name FROM categories ORDER BY id"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["columns"], json!(["id", "name"]));
        assert_eq!(body["rows"][0], json!({"id": 1, "name": "Electronics"}));
        assert_eq!(body["metadata"]["highlightedRows"], json!([]));
    }

    #[actix_rt::test]
    async fn test_execute_non_string_query() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(sandbox()))
                .service(execute_sql),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/execute-sql")
            .set_json(json!({"query": 7}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Query is required"}));
    }
}
