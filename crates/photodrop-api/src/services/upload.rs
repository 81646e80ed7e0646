//! Upload relay service
//!
//! Runs the relay pipeline for one request: receive → name → resolve type →
//! stream to remote storage → delete the temp artifact.

use std::sync::Arc;

use axum::extract::Multipart;
use photodrop_core::models::RemoteObject;
use photodrop_core::validation::{client_filename, resolve_content_type};
use photodrop_core::AppError;
use tracing::Instrument;

use crate::state::AppState;
use crate::utils::upload::{receive_upload, ReceivedFile, UploadLimits};

pub struct UploadRelayService {
    state: Arc<AppState>,
}

impl UploadRelayService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Receive the `photo` file and forward it to the configured folder.
    ///
    /// The temp artifact is gone when this returns, whatever the outcome.
    pub async fn upload(&self, multipart: Multipart) -> Result<RemoteObject, AppError> {
        let config = &self.state.config;
        let received = receive_upload(
            multipart,
            &config.upload_dir,
            UploadLimits {
                max_file_size_bytes: config.max_file_size_bytes,
                allowed_mime: &config.allowed_mime,
            },
        )
        .await?;

        self.forward(received).await
    }

    /// Relay on a task of its own. Dropping the request future detaches the
    /// task, so a remote call in flight runs to completion and the temp
    /// artifact is still removed.
    async fn forward(&self, received: ReceivedFile) -> Result<RemoteObject, AppError> {
        tokio::spawn(relay(self.state.clone(), received).in_current_span())
            .await
            .map_err(|e| AppError::Internal(format!("Upload task failed: {}", e)))?
    }
}

async fn relay(state: Arc<AppState>, received: ReceivedFile) -> Result<RemoteObject, AppError> {
    let ReceivedFile { request, temp_file } = received;

    let remote_name = state.names.next_name(&request.original_filename);
    let content_type = resolve_content_type(
        &client_filename(&request.original_filename),
        request.declared_mime.as_deref(),
    );

    let reader = tokio::fs::File::open(&request.temp_path).await?;
    let object = state
        .storage
        .upload_stream(
            &state.config.drive_folder_id,
            &remote_name,
            &content_type,
            request.size_bytes,
            Box::pin(reader),
        )
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    tracing::info!(
        remote_id = %object.id,
        remote_name = %object.name,
        web_view_link = ?object.web_view_link,
        content_type = %content_type,
        size_bytes = request.size_bytes,
        backend = state.storage.backend_name(),
        "File relayed to remote storage"
    );

    if let Err(e) = temp_file.close() {
        tracing::warn!(
            error = %e,
            temp_path = %request.temp_path.display(),
            "Failed to delete temp file after upload"
        );
    }

    Ok(object)
}
