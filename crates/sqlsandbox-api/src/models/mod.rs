//! API data models
//!
//! Request and response bodies for the sandbox endpoints. Successful
//! execution and schema responses serialize the core types directly.

pub mod error_response;
pub mod health_response;
pub mod practice;
pub mod sql_request;

// Re-export commonly used types
pub use error_response::ErrorResponse;
pub use health_response::HealthResponse;
pub use practice::{QuestionFilter, SolutionResponse};
pub use sql_request::SqlRequest;
