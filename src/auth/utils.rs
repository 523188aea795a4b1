use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::Role,
};

/// Per-route authorization: the caller's token role must equal `required`.
pub fn require_role(claims: &Claims, required: Role, action: &str) -> AppResult<()> {
    if claims.role != required {
        log::warn!(
            "User {} with role {} tried to {} (requires {})",
            claims.sub,
            claims.role,
            action,
            required
        );
        return Err(AppError::Forbidden(format!(
            "only {}s can {}",
            required.as_str().to_lowercase(),
            action
        )));
    }
    Ok(())
}

pub fn require_admin(claims: &Claims, action: &str) -> AppResult<()> {
    require_role(claims, Role::Admin, action)
}

pub fn require_student(claims: &Claims, action: &str) -> AppResult<()> {
    require_role(claims, Role::Student, action)
}
