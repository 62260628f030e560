//! Practice-mode request and response models

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/practice/questions`.
///
/// `difficulty` accepts `easy`, `medium`, `hard`, or `all` (same as absent).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionFilter {
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionResponse {
    pub id: u32,
    pub solution: String,
}
