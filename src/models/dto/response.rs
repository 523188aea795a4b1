use serde::{Deserialize, Serialize};

use crate::models::domain::{Role, Test};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTestResponse {
    pub message: String,
    pub test: Test,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadTestsResponse {
    pub message: String,
    pub inserted: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTestResponse {
    pub message: String,
    pub score: String,
}
