//! End-to-end tests for the practice and operational endpoints

#[macro_use]
mod common;

use actix_web::test;
use common::seeded_sandbox;
use serde_json::{json, Value};
use std::fs;

#[actix_web::test]
async fn test_list_questions_hides_answers() {
    let app = init_app!(seeded_sandbox());

    let req = test::TestRequest::get().uri("/api/practice/questions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let questions = body.as_array().unwrap();

    assert_eq!(questions.len(), 8);
    assert_eq!(questions[0]["title"], "List All Users");
    for question in questions {
        assert!(question.get("expected").is_none());
        assert!(question.get("solution").is_none());
        assert!(question["hint"].is_string());
    }
}

#[actix_web::test]
async fn test_filter_by_difficulty() {
    let app = init_app!(seeded_sandbox());

    let req = test::TestRequest::get()
        .uri("/api/practice/questions?difficulty=medium")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.as_array().unwrap().iter().all(|q| q["difficulty"] == "medium"));
    assert_eq!(body.as_array().unwrap().len(), 4);

    let req = test::TestRequest::get()
        .uri("/api/practice/questions?difficulty=impossible")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_solution_and_missing_question() {
    let app = init_app!(seeded_sandbox());

    let req = test::TestRequest::get()
        .uri("/api/practice/questions/4/solution")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], 4);
    assert_eq!(body["solution"], "SELECT * FROM products\nORDER BY price DESC\nLIMIT 5;");

    let req = test::TestRequest::get()
        .uri("/api/practice/questions/9/solution")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Practice question not found" }));
}

#[actix_web::test]
async fn test_check_answer() {
    let app = init_app!(seeded_sandbox());

    let req = test::TestRequest::post()
        .uri("/api/practice/questions/8/check")
        .set_json(json!({
            "query": "SELECT * FROM users\n  LEFT JOIN orders ON users.id = orders.user_id\n  WHERE orders.id IS NULL;"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "correct": true, "message": "Great job! Your query is correct." }));

    let req = test::TestRequest::post()
        .uri("/api/practice/questions/8/check")
        .set_json(json!({ "query": "SELECT * FROM users" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["correct"], false);
    assert_eq!(body["message"], "Not quite right. Your query doesn't match the expected solution.");
}

#[actix_web::test]
async fn test_check_never_executes_sql() {
    let sandbox = seeded_sandbox();
    let app = init_app!(std::sync::Arc::clone(&sandbox));

    let req = test::TestRequest::post()
        .uri("/api/practice/questions/1/check")
        .set_json(json!({ "query": "INSERT INTO categories (name) VALUES ('Nope')" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let envelope = sandbox
        .execute(Some("SELECT COUNT(*) AS n FROM categories WHERE name = 'Nope'"))
        .unwrap();
    assert_eq!(envelope.rows[0].get("n").and_then(|v| v.as_i64()), Some(0));
}

#[actix_web::test]
async fn test_healthcheck() {
    let app = init_app!(seeded_sandbox());

    let req = test::TestRequest::get().uri("/api/healthcheck").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[actix_web::test]
async fn test_static_ui_is_served_after_api() {
    let ui_dir = tempfile::tempdir().unwrap();
    fs::write(ui_dir.path().join("index.html"), "<html>sandbox</html>").unwrap();
    let ui_path = ui_dir.path().to_string_lossy().to_string();

    let app = test::init_service(
        actix_web::App::new()
            .app_data(actix_web::web::Data::new(seeded_sandbox()))
            .configure(sqlsandbox_server::routes::configure)
            .configure(|cfg| sqlsandbox_server::routes::configure_ui_routes(cfg, &ui_path)),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "<html>sandbox</html>".as_bytes());

    let req = test::TestRequest::get().uri("/api/healthcheck").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}
