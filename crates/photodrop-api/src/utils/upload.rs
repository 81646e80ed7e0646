//! Receiving the uploaded file from a multipart form

use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use photodrop_core::constants::UPLOAD_FIELD_NAME;
use photodrop_core::models::UploadRequest;
use photodrop_core::{AppError, MimeRule};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

/// Content type assumed for a file part that does not declare one
const DEFAULT_PART_CONTENT_TYPE: &str = "application/octet-stream";

/// The `photo` part, written to a temp artifact.
///
/// The artifact is deleted when this value is dropped, so every early return
/// cleans up after itself.
#[derive(Debug)]
pub struct ReceivedFile {
    pub request: UploadRequest,
    pub temp_file: NamedTempFile,
}

/// Limits applied while the file is received
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits<'a> {
    pub max_file_size_bytes: u64,
    pub allowed_mime: &'a MimeRule,
}

/// Extract the single `photo` file from the form into `upload_dir`.
///
/// Other fields are skipped. A second `photo` file is rejected. The declared
/// MIME type is checked before anything is written and the size is enforced
/// while streaming, so rejected files never reach the remote store.
pub async fn receive_upload(
    mut multipart: Multipart,
    upload_dir: &Path,
    limits: UploadLimits<'_>,
) -> Result<ReceivedFile, AppError> {
    let mut received: Option<ReceivedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limits.max_file_size_bytes))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        // A file input left empty is sent with `filename=""`
        let is_file = field.file_name().is_some_and(|name| !name.is_empty());
        if !is_file {
            tracing::debug!("Ignoring '{}' field without a file", UPLOAD_FIELD_NAME);
            continue;
        }

        if received.is_some() {
            return Err(AppError::InvalidInput(format!(
                "Multiple '{}' files are not allowed",
                UPLOAD_FIELD_NAME
            )));
        }

        received = Some(receive_file_field(field, upload_dir, limits).await?);
    }

    received.ok_or(AppError::NoFile)
}

async fn receive_file_field(
    mut field: Field<'_>,
    upload_dir: &Path,
    limits: UploadLimits<'_>,
) -> Result<ReceivedFile, AppError> {
    let original_filename = field.file_name().unwrap_or_default().to_string();
    let declared_mime = field.content_type().map(str::to_string);

    let checked_type = declared_mime.as_deref().unwrap_or(DEFAULT_PART_CONTENT_TYPE);
    if !limits.allowed_mime.allows(checked_type) {
        return Err(AppError::UnsupportedMediaType {
            content_type: checked_type.to_string(),
            allowed: limits.allowed_mime.to_string(),
        });
    }

    let temp_file = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".part")
        .tempfile_in(upload_dir)?;
    let mut writer = tokio::fs::File::from_std(temp_file.as_file().try_clone()?);

    let mut size_bytes: u64 = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, limits.max_file_size_bytes))?
    {
        size_bytes += chunk.len() as u64;
        if size_bytes > limits.max_file_size_bytes {
            return Err(AppError::PayloadTooLarge {
                max_bytes: limits.max_file_size_bytes,
            });
        }
        writer.write_all(&chunk).await?;
    }
    writer.flush().await?;

    tracing::debug!(
        filename = %original_filename,
        declared_mime = ?declared_mime,
        size_bytes,
        temp_path = %temp_file.path().display(),
        "File received"
    );

    Ok(ReceivedFile {
        request: UploadRequest {
            original_filename,
            declared_mime,
            size_bytes,
            temp_path: temp_file.path().to_path_buf(),
        },
        temp_file,
    })
}

/// Body-limit failures surface as multipart errors with a 413 status
fn multipart_error(err: MultipartError, max_bytes: u64) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { max_bytes }
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}
