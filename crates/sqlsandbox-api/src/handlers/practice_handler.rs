//! Practice-mode handlers under `/api/practice`
//!
//! The question bank is static and answer checks compare text only, so these
//! handlers never touch the store.

use actix_web::{get, post, web, HttpResponse, Responder};
use log::debug;
use sqlsandbox_core::practice::{self, Difficulty};

use super::response::error_response;
use crate::models::{QuestionFilter, SolutionResponse, SqlRequest};

/// GET /api/practice/questions[?difficulty=easy|medium|hard|all]
#[get("/questions")]
pub async fn list_questions(filter: web::Query<QuestionFilter>) -> impl Responder {
    let difficulty = match filter.difficulty.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(d) if d.eq_ignore_ascii_case("all") => None,
        Some(d) => match d.parse::<Difficulty>() {
            Ok(parsed) => Some(parsed),
            Err(err) => return error_response(&err),
        },
    };

    HttpResponse::Ok().json(practice::questions(difficulty))
}

/// GET /api/practice/questions/{id}/solution
#[get("/questions/{id}/solution")]
pub async fn question_solution(path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();
    match practice::find(id) {
        Ok(question) => HttpResponse::Ok().json(SolutionResponse {
            id: question.id,
            solution: question.solution.to_string(),
        }),
        Err(err) => error_response(&err),
    }
}

/// POST /api/practice/questions/{id}/check - Compare an answer with the
/// expected query text
#[post("/questions/{id}/check")]
pub async fn check_answer(path: web::Path<u32>, req: web::Json<SqlRequest>) -> impl Responder {
    let id = path.into_inner();
    let answer = req.query_text().unwrap_or_default();

    match practice::check_answer(id, answer) {
        Ok(feedback) => {
            debug!("Practice question {} checked: correct={}", id, feedback.correct);
            HttpResponse::Ok().json(feedback)
        }
        Err(err) => error_response(&err),
    }
}
