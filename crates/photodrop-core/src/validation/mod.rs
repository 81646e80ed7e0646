//! Validation modules

pub mod mime;
pub mod naming;

pub use mime::{normalize_mime_type, resolve_content_type, MimeRule};
pub use naming::{client_filename, RemoteNameGenerator};
