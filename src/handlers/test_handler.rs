use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_admin, require_student, AuthenticatedUser},
    errors::AppError,
    handlers::parse_json,
    models::dto::{
        request::{CreateTestRequest, SubmitTestRequest},
        response::{CreateTestResponse, MessageResponse, SubmitTestResponse},
    },
};

// Student routes

#[get("/get-tests")]
pub async fn list_student_tests(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0, "view tests")?;

    let tests = state.test_service.list_tests().await?;
    Ok(HttpResponse::Ok().json(tests))
}

#[get("/get-test/{id}")]
pub async fn get_student_test(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0, "take tests")?;

    let test = state.test_service.get_test(&id).await?;
    Ok(HttpResponse::Ok().json(test))
}

#[post("/submit-test")]
pub async fn submit_test(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0, "submit tests")?;

    let request: SubmitTestRequest = parse_json(&body)?;
    let score = state.test_service.submit(request).await?;
    Ok(HttpResponse::Ok().json(SubmitTestResponse {
        message: "Test submitted successfully".to_string(),
        score: score.to_string(),
    }))
}

// Admin routes

#[get("/admin/tests")]
pub async fn list_admin_tests(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0, "view tests")?;

    let tests = state.test_service.list_tests().await?;
    Ok(HttpResponse::Ok().json(tests))
}

#[post("/admin/tests")]
pub async fn create_test(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0, "add tests")?;

    let request: CreateTestRequest = parse_json(&body)?;
    let test = state.test_service.create_test(request).await?;
    Ok(HttpResponse::Created().json(CreateTestResponse {
        message: "Test added successfully!".to_string(),
        test,
    }))
}

#[delete("/admin/tests/{id}")]
pub async fn delete_test(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0, "delete tests")?;

    state.test_service.delete_test(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Test deleted successfully")))
}
