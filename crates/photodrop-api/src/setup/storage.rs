//! Storage setup and initialization

use anyhow::Result;
use photodrop_core::Config;
use photodrop_storage::{create_storage, RemoteStorage};
use std::sync::Arc;

/// Setup the remote storage backend uploads are relayed to
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn RemoteStorage>> {
    tracing::info!("Initializing remote storage...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = storage.backend_name(),
        folder_id = %config.drive_folder_id,
        "Remote storage initialized successfully"
    );

    Ok(storage)
}
