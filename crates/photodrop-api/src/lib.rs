//! Photodrop API Library
//!
//! This crate provides the HTTP handlers and application setup of the upload
//! relay.

// Module declarations
mod handlers;
mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
