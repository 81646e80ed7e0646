//! Photodrop Core Library
//!
//! Configuration, error types, data models and validation shared by the
//! storage and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::{MimeRule, RemoteNameGenerator};
