use std::env;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub users_collection: String,
    pub tests_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub cors_allowed_origin: String,
    pub upload_max_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .or_else(|_| env::var("MONGO_URI"))
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "online-tests".to_string()),
            users_collection: env::var("USERS_COLLECTION").unwrap_or_else(|_| "users".to_string()),
            tests_collection: env::var("TESTS_COLLECTION").unwrap_or_else(|_| "tests".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(1),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            upload_max_bytes: env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configuration that is only acceptable on a developer machine.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value; set it to a secure random string"
                    .to_string(),
            ));
        }

        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}); it must be at least {} characters",
                jwt_secret.len(),
                MIN_JWT_SECRET_LEN
            )));
        }

        if self.jwt_expiration_hours <= 0 {
            return Err(AppError::InternalError(
                "JWT_EXPIRATION_HOURS must be positive".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "online-tests-test".to_string(),
            users_collection: "users".to_string(),
            tests_collection: "tests".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 3000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            upload_max_bytes: 1024 * 1024,
        }
    }
}
