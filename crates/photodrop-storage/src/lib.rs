//! Photodrop Storage Library
//!
//! This crate provides the remote storage abstraction the upload relay forwards
//! files to, and its Google Drive implementation.
//!
//! # Authentication
//!
//! Drive requests carry a bearer token minted from a service account key (see
//! [`auth::ServiceAccountTokenProvider`]). The token source is a trait so tests
//! and other credential flows can be plugged in.

pub mod auth;
pub mod drive;
pub mod factory;
pub mod traits;

// Re-export commonly used types
pub use auth::{AccessTokenProvider, ServiceAccountKey, ServiceAccountTokenProvider};
pub use drive::DriveStorage;
pub use factory::create_storage;
pub use traits::{RemoteStorage, StorageError, StorageResult, UploadReader};
