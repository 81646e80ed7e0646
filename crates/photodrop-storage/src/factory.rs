use crate::{
    DriveStorage, RemoteStorage, ServiceAccountKey, ServiceAccountTokenProvider, StorageResult,
};
use photodrop_core::constants::DRIVE_FILE_SCOPE;
use photodrop_core::Config;
use std::sync::Arc;

/// Create the Drive storage backend from configuration
///
/// Reads the service account key named by `GOOGLE_APPLICATION_CREDENTIALS`; a
/// missing or unusable key is a startup error.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn RemoteStorage>> {
    let key = ServiceAccountKey::from_file(&config.credentials_path).await?;
    let http_client = DriveStorage::http_client(config.upload_timeout)?;

    tracing::info!(
        client_email = %key.client_email,
        base_url = %config.drive_api_base_url,
        timeout_secs = config.upload_timeout.as_secs(),
        "Configuring Drive storage"
    );

    let tokens = ServiceAccountTokenProvider::new(key, DRIVE_FILE_SCOPE, http_client.clone())?;
    let storage = DriveStorage::new(
        config.drive_api_base_url.clone(),
        Arc::new(tokens),
        http_client,
        config.upload_timeout,
    );

    Ok(Arc::new(storage))
}
