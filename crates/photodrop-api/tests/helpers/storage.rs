use async_trait::async_trait;
use photodrop_core::models::RemoteObject;
use photodrop_storage::{RemoteStorage, StorageError, StorageResult, UploadReader};
use std::sync::Mutex;
use tokio::io::AsyncReadExt;

/// One call to `upload_stream` as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub parent_id: String,
    pub name: String,
    pub content_type: String,
    pub content_length: u64,
    pub content: Vec<u8>,
}

/// In-memory `RemoteStorage` that records every upload.
pub struct RecordingStorage {
    uploads: Mutex<Vec<RecordedUpload>>,
    fail: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A stub whose uploads are consumed and then rejected by the "provider".
    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteStorage for RecordingStorage {
    async fn upload_stream(
        &self,
        parent_id: &str,
        name: &str,
        content_type: &str,
        content_length: u64,
        mut reader: UploadReader,
    ) -> StorageResult<RemoteObject> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content).await?;
        // Let concurrent requests interleave
        tokio::task::yield_now().await;

        let id = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(RecordedUpload {
                parent_id: parent_id.to_string(),
                name: name.to_string(),
                content_type: content_type.to_string(),
                content_length,
                content,
            });
            format!("file-{}", uploads.len())
        };

        if self.fail {
            return Err(StorageError::UploadFailed(
                "Drive content upload returned 403 Forbidden: storageQuotaExceeded".to_string(),
            ));
        }

        Ok(RemoteObject {
            web_view_link: Some(format!("https://drive.google.com/file/d/{}/view", id)),
            id,
            name: name.to_string(),
            parent_id: parent_id.to_string(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}
