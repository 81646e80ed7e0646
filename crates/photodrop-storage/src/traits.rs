//! Storage abstraction trait
//!
//! This module defines the RemoteStorage trait that the upload relay forwards
//! files to.

use async_trait::async_trait;
use photodrop_core::models::RemoteObject;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StorageError::Timeout(err.to_string())
        } else {
            StorageError::BackendError(err.to_string())
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte source handed to [`RemoteStorage::upload_stream`].
pub type UploadReader = Pin<Box<dyn AsyncRead + Send + Sync + Unpin>>;

/// Remote storage abstraction
///
/// The relay only ever creates objects; it never reads, lists or deletes them.
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    /// Create a remote object from a stream
    ///
    /// The reader is consumed until EOF and is not buffered in memory.
    ///
    /// # Arguments
    /// * `parent_id` - Container the object is created under
    /// * `name` - Remote object name
    /// * `content_type` - MIME type presented to the provider
    /// * `content_length` - Exact size of the content in bytes
    /// * `reader` - Async reader that provides the file content
    async fn upload_stream(
        &self,
        parent_id: &str,
        name: &str,
        content_type: &str,
        content_length: u64,
        reader: UploadReader,
    ) -> StorageResult<RemoteObject>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
