//! Route configuration and setup.
//!
//! `/upload` and the health check are explicit routes; every other path is
//! served from the public directory.

mod health;

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries, part headers and small extra fields
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    let body_limit = state
        .config
        .max_file_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    let static_files = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route(
            "/upload",
            post(handlers::upload::upload).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/health", get(health::liveness_check))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
