//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p photodrop-api --test upload_test`.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use axum_test::TestServer;
use photodrop_api::setup::routes;
use photodrop_api::AppState;
use photodrop_core::Config;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use storage::RecordingStorage;

pub const TEST_FOLDER_ID: &str = "test-folder-id";

/// Test application: server, recording storage, and owned directories.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<RecordingStorage>,
    pub upload_dir: TempDir,
    pub public_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of temp artifacts currently left in the upload directory.
    pub fn temp_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .count()
    }
}

/// Options that differ between tests.
#[derive(Clone, Copy)]
pub struct TestOptions {
    pub max_file_size_mb: u64,
    pub allowed_mime: &'static str,
    pub storage_fails: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            max_file_size_mb: 25,
            allowed_mime: "image/*",
            storage_fails: false,
        }
    }
}

pub fn test_config(upload_dir: &Path, public_dir: &Path, options: TestOptions) -> Config {
    let upload_dir = upload_dir.to_string_lossy().to_string();
    let public_dir = public_dir.to_string_lossy().to_string();
    let max_file_size_mb = options.max_file_size_mb.to_string();

    Config::from_lookup(|key| match key {
        "GOOGLE_APPLICATION_CREDENTIALS" => Some("/unused/service-account.json".to_string()),
        "DRIVE_FOLDER_ID" => Some(TEST_FOLDER_ID.to_string()),
        "MAX_FILE_SIZE_MB" => Some(max_file_size_mb.clone()),
        "ALLOWED_MIME" => Some(options.allowed_mime.to_string()),
        "UPLOAD_DIR" => Some(upload_dir.clone()),
        "PUBLIC_DIR" => Some(public_dir.clone()),
        _ => None,
    })
    .expect("Failed to build test config")
}

/// Setup test app with a recording storage stub in place of Drive.
pub fn setup_test_app(options: TestOptions) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
    let public_dir = tempfile::tempdir().expect("Failed to create public dir");
    std::fs::write(
        public_dir.path().join("index.html"),
        fixtures::INDEX_HTML,
    )
    .expect("Failed to write index.html");

    let config = test_config(upload_dir.path(), public_dir.path(), options);
    let storage = Arc::new(if options.storage_fails {
        RecordingStorage::failing()
    } else {
        RecordingStorage::new()
    });

    let state = AppState::new(config, storage.clone());
    let app = routes::setup_routes(state);
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        upload_dir,
        public_dir,
    }
}
