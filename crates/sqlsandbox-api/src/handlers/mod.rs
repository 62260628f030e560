//! HTTP request handlers
//!
//! Engine work runs on the blocking pool through `web::block`; the shared
//! [`SqlSandbox`](sqlsandbox_core::SqlSandbox) arrives as
//! `web::Data<Arc<SqlSandbox>>`.

pub mod health_handler;
pub mod practice_handler;
pub mod response;
pub mod schema_handler;
pub mod sql_handler;

pub use health_handler::healthcheck_handler;
pub use practice_handler::{check_answer, list_questions, question_solution};
pub use response::error_response;
pub use schema_handler::get_schema;
pub use sql_handler::execute_sql;
