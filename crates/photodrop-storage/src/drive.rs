//! Google Drive storage implementation
//!
//! Files are created with the Drive v3 resumable upload protocol: a metadata
//! request opens an upload session, then the content is streamed to the session
//! URL in a single `PUT` with a known length.

use crate::auth::AccessTokenProvider;
use crate::traits::{RemoteStorage, StorageError, StorageResult, UploadReader};
use async_trait::async_trait;
use photodrop_core::models::RemoteObject;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::io::ReaderStream;

const FILES_UPLOAD_PATH: &str = "/upload/drive/v3/files";
const RESPONSE_FIELDS: &str = "id,name,webViewLink";
const MAX_ERROR_BODY_CHARS: usize = 512;
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Slowest uplink the content deadline allows for (512 kbit/s)
const MIN_UPLOAD_BYTES_PER_SEC: u64 = 64 * 1024;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    parents: [&'a str; 1],
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: Option<String>,
    web_view_link: Option<String>,
}

pub struct DriveStorage {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
    request_timeout: Duration,
}

impl DriveStorage {
    /// `request_timeout` bounds the session request. The content upload gets
    /// [`content_deadline`] on top of it.
    pub fn new(
        base_url: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
        http_client: reqwest::Client,
        request_timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
            tokens,
            request_timeout,
        }
    }

    /// HTTP client whose default whole-request deadline is `timeout`.
    ///
    /// Token and session requests use that default. The content `PUT`
    /// overrides it per request.
    pub fn http_client(timeout: Duration) -> StorageResult<reqwest::Client> {
        reqwest::Client::builder()
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to build HTTP client: {}", e)))
    }

    async fn start_session(
        &self,
        token: &str,
        parent_id: &str,
        name: &str,
        content_type: &str,
        content_length: u64,
    ) -> StorageResult<String> {
        let metadata = FileMetadata {
            name,
            parents: [parent_id],
            mime_type: content_type,
        };

        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, FILES_UPLOAD_PATH))
            .query(&[
                ("uploadType", "resumable"),
                ("fields", RESPONSE_FIELDS),
                ("supportsAllDrives", "true"),
            ])
            .bearer_auth(token)
            .header("X-Upload-Content-Type", content_type)
            .header("X-Upload-Content-Length", content_length.to_string())
            .json(&metadata)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response, "Drive session request").await);
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                StorageError::BackendError(
                    "Drive session response is missing the Location header".to_string(),
                )
            })
    }
}

#[async_trait]
impl RemoteStorage for DriveStorage {
    #[tracing::instrument(skip(self, reader), fields(backend = "drive"))]
    async fn upload_stream(
        &self,
        parent_id: &str,
        name: &str,
        content_type: &str,
        content_length: u64,
        reader: UploadReader,
    ) -> StorageResult<RemoteObject> {
        let started = Instant::now();
        let token = self.tokens.access_token().await?;
        let session_url = self
            .start_session(&token, parent_id, name, content_type, content_length)
            .await?;

        tracing::debug!("Drive upload session opened");

        let body = reqwest::Body::wrap_stream(ReaderStream::new(reader));
        let response = self
            .http_client
            .put(&session_url)
            .bearer_auth(&token)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, content_length)
            .timeout(content_deadline(self.request_timeout, content_length))
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response, "Drive content upload").await);
        }

        let file: DriveFile = response.json().await.map_err(|e| {
            StorageError::BackendError(format!("Invalid Drive upload response: {}", e))
        })?;

        tracing::info!(
            file_id = %file.id,
            size_bytes = content_length,
            duration_ms = started.elapsed().as_millis() as u64,
            "Drive upload successful"
        );

        Ok(RemoteObject {
            id: file.id,
            name: file.name.unwrap_or_else(|| name.to_string()),
            parent_id: parent_id.to_string(),
            web_view_link: file.web_view_link,
        })
    }

    fn backend_name(&self) -> &'static str {
        "drive"
    }
}

/// Deadline for streaming `content_length` bytes: the request timeout plus the
/// time the body takes at [`MIN_UPLOAD_BYTES_PER_SEC`].
pub fn content_deadline(request_timeout: Duration, content_length: u64) -> Duration {
    request_timeout
        .saturating_add(Duration::from_secs(content_length / MIN_UPLOAD_BYTES_PER_SEC))
}

async fn status_error(response: Response, context: &str) -> StorageError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    let message = format!("{} returned {}: {}", context, status, body);

    match status {
        StatusCode::UNAUTHORIZED => StorageError::AuthFailed(message),
        _ => StorageError::UploadFailed(message),
    }
}
