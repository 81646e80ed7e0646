//! Application state shared by all handlers.

use photodrop_core::{Config, RemoteNameGenerator};
use photodrop_storage::RemoteStorage;
use std::sync::Arc;

/// Built once at startup and handed to handlers through axum `State`.
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn RemoteStorage>,
    /// Remote names must stay unique across concurrent requests
    pub names: RemoteNameGenerator,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn RemoteStorage>) -> Arc<Self> {
        Arc::new(Self {
            config,
            storage,
            names: RemoteNameGenerator::new(),
        })
    }
}
