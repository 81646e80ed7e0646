//! Error types module
//!
//! All failures of the upload relay are unified under [`AppError`]. Each variant
//! describes its own HTTP presentation through [`ErrorMetadata`], so the API layer
//! only has to render what the error says about itself.
//!
//! Remote storage failures of every kind (auth, quota, network, provider-side
//! validation) collapse into [`AppError::Storage`]; the cause is logged, never
//! returned to the client.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing file field
    Debug,
    /// Warning level - for rejected uploads (size, type)
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR"), used in logs
    fn error_code(&self) -> &'static str;

    /// Client-facing message. Never contains internal details.
    fn client_message(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: exceeds limit of {max_bytes} bytes")]
    PayloadTooLarge { max_bytes: u64 },

    #[error("Unsupported media type '{content_type}' (allowed: {allowed})")]
    UnsupportedMediaType {
        content_type: String,
        allowed: String,
    },

    #[error("Remote storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, client_message, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, &'static str, LogLevel) {
    match err {
        AppError::NoFile => (400, "NO_FILE", "No file uploaded", LogLevel::Debug),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            "Invalid upload request",
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge { .. } => {
            (413, "PAYLOAD_TOO_LARGE", "File too large", LogLevel::Warn)
        }
        AppError::UnsupportedMediaType { .. } => (
            415,
            "UNSUPPORTED_MEDIA_TYPE",
            "Invalid file type",
            LogLevel::Warn,
        ),
        AppError::Storage(_) => (500, "STORAGE_ERROR", "Upload failed", LogLevel::Error),
        AppError::Io(_) => (500, "IO_ERROR", "Upload failed", LogLevel::Error),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => {
            (500, "INTERNAL_ERROR", "Upload failed", LogLevel::Error)
        }
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NoFile => "NoFile",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::UnsupportedMediaType { .. } => "UnsupportedMediaType",
            AppError::Storage(_) => "Storage",
            AppError::Io(_) => "Io",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn client_message(&self) -> &'static str {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}
