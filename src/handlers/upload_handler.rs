use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use futures::TryStreamExt;

use crate::{
    app_state::AppState,
    auth::{require_admin, AuthenticatedUser},
    errors::{AppError, AppResult},
    models::dto::response::UploadTestsResponse,
};

const FILE_FIELD: &str = "file";

#[post("/admin/upload-tests")]
pub async fn upload_tests(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0, "upload tests")?;

    let bytes = read_file_field(&mut payload, state.config.upload_max_bytes).await?;
    log::info!("User {} uploaded a {} byte workbook", auth.0.sub, bytes.len());

    let inserted = state.test_service.import_workbook(bytes).await?;
    Ok(HttpResponse::Created().json(UploadTestsResponse {
        message: "Tests uploaded successfully!".to_string(),
        inserted,
    }))
}

/// Buffers the `file` part in memory, skipping any other parts.
async fn read_file_field(payload: &mut Multipart, max_bytes: usize) -> AppResult<Vec<u8>> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(FILE_FIELD) {
            while field.try_next().await?.is_some() {}
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::ValidationError(format!(
                    "Upload exceeds the {} byte limit",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }

    Err(AppError::ValidationError(format!(
        "Missing '{}' field in upload",
        FILE_FIELD
    )))
}
