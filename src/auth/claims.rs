use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub role: Role,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user_id: &str, role: Role, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let exp = issued_at + lifetime;

        Self {
            sub: user_id.to_string(),
            role,
            iat: issued_at.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
