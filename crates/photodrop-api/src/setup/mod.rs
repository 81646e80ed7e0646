//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use photodrop_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first so startup failures are logged
    crate::telemetry::init_telemetry(config.is_production())
        .context("Failed to initialize telemetry")?;

    // Validate configuration and prepare directories - fail fast on misconfiguration
    if let Err(e) = validation::validate_config(&config).await {
        tracing::error!(error = %e, "Configuration validation failed");
        return Err(e.context("Configuration validation failed"));
    }

    tracing::info!("Configuration loaded and validated successfully");

    // Setup storage
    let storage = match storage::setup_storage(&config).await {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!(error = %e, "Storage initialization failed");
            return Err(e);
        }
    };

    let state = AppState::new(config, storage);

    // Setup routes
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
