pub mod auth_handler;
pub mod health_handler;
pub mod test_handler;
pub mod upload_handler;

use actix_web::web;
use serde::de::DeserializeOwned;

use crate::{
    auth::AuthMiddleware,
    errors::{AppError, AppResult},
};

pub use auth_handler::{login, logout, register};
pub use health_handler::{health_check, health_check_ready};
pub use test_handler::{
    create_test, delete_test, get_student_test, list_admin_tests, list_student_tests, submit_test,
};
pub use upload_handler::upload_tests;

/// Registers every route. Everything after the public routes sits behind
/// [`AuthMiddleware`].
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into());

    cfg.app_data(json_config)
        .service(health_check)
        .service(health_check_ready)
        .service(register)
        .service(login)
        .service(logout)
        .service(
            web::scope("")
                .wrap(AuthMiddleware)
                .service(list_student_tests)
                .service(get_student_test)
                .service(submit_test)
                .service(list_admin_tests)
                .service(create_test)
                .service(delete_test)
                .service(upload_tests),
        );
}

/// Decodes a raw JSON body. Role-gated routes take `web::Bytes` and call this
/// after the role check so a wrong-role caller never reaches body parsing.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("Json deserialize error: {}", e)))
}
