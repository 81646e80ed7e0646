//! Upload request and response models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A received file waiting to be relayed.
///
/// `temp_path` points at the local temp artifact; the owner of the request is
/// responsible for removing it.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub original_filename: String,
    /// MIME type declared by the client for the multipart part
    pub declared_mime: Option<String>,
    pub size_bytes: u64,
    pub temp_path: PathBuf,
}

/// Body returned for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
}

impl UploadResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}
