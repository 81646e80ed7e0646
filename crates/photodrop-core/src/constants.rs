//! Constants shared across crates.

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "photo";

/// OAuth scope requested for Drive uploads. Grants access only to files the
/// service account creates.
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";
