use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Role;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    // Kept as text so an unknown role gets the same message as a missing one.
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestRequest {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(range(min = 1))]
    pub duration: u32,

    #[validate(nested)]
    pub questions: Vec<QuestionInput>,

    #[serde(default)]
    pub available_for: Vec<Role>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    #[validate(length(min = 1))]
    pub text: String,

    #[validate(length(equal = 4))]
    pub options: Vec<String>,

    #[validate(range(max = 3))]
    pub correct_answer: u8,
}

/// Answers are positional; `null` marks an unanswered question.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestRequest {
    #[validate(length(min = 1))]
    pub test_id: String,

    #[serde(default)]
    pub answers: Vec<Option<i64>>,
}
