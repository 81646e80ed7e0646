use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use photodrop_core::models::UploadResponse;

use crate::error::HttpAppError;
use crate::services::upload::UploadRelayService;
use crate::state::AppState;

/// Upload handler
///
/// Relays the multipart `photo` file to remote storage.
///
/// # Errors
/// - `AppError::NoFile` - no `photo` file in the form (400)
/// - `AppError::InvalidInput` - malformed form or duplicate `photo` (400)
/// - `AppError::PayloadTooLarge` - file exceeds the size limit (413)
/// - `AppError::UnsupportedMediaType` - declared type not allowed (415)
/// - `AppError::Storage` - remote upload failure (500)
#[tracing::instrument(
    skip(state, multipart),
    fields(request_id = %uuid::Uuid::new_v4(), operation = "upload")
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart?;

    UploadRelayService::new(&state).upload(multipart).await?;

    Ok(Json(UploadResponse::success()))
}
