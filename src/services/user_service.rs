use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::{Role, User},
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::LoginResponse,
        },
    },
    repositories::UserRepository,
};

/// Registration and login over the credential store.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        let role: Role = request.role.as_deref().unwrap_or_default().parse().map_err(|e| {
            log::warn!("Registration for '{}' rejected: bad role", request.username);
            e
        })?;

        if self
            .repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            log::warn!("Registration rejected: '{}' already exists", request.username);
            return Err(AppError::AlreadyExists(format!(
                "User '{}'",
                request.username
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .repository
            .create(User::new(&request.username, password_hash, role))
            .await?;

        log::info!("Registered {} '{}' ({})", user.role, user.username, user.id);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let user = self
            .repository
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                log::warn!("Login failed: unknown user '{}'", request.username);
                AppError::UserNotFound(request.username.clone())
            })?;

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("Login failed: wrong password for '{}'", user.username);
            return Err(AppError::InvalidCredentials("Invalid password".to_string()));
        }

        let token = self.jwt_service.issue(&user.id, user.role)?;
        log::info!("User '{}' logged in as {}", user.username, user.role);

        Ok(LoginResponse {
            message: "Login successful!".to_string(),
            token,
            role: user.role,
        })
    }
}
