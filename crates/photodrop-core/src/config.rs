//! Configuration module
//!
//! Settings for the upload relay, read once at startup from the process
//! environment (a `.env` file in the working directory is loaded first).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::validation::MimeRule;

// Defaults
const SERVER_PORT: u16 = 3000;
const MAX_FILE_SIZE_MB: f64 = 25.0;
const ALLOWED_MIME: &str = "image/*";
const UPLOAD_DIR: &str = "uploads";
const PUBLIC_DIR: &str = "public";
const UPLOAD_TIMEOUT_SECS: u64 = 120;
pub const DRIVE_API_BASE_URL: &str = "https://www.googleapis.com";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Path to the Google service account JSON key
    pub credentials_path: PathBuf,
    /// Drive folder every upload is created under
    pub drive_folder_id: String,
    pub drive_api_base_url: String,
    pub max_file_size_bytes: u64,
    pub allowed_mime: MimeRule,
    /// Where temp artifacts are written while a request is in flight
    pub upload_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Deadline applied to each request made to the storage provider
    pub upload_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let credentials_path = var("GOOGLE_APPLICATION_CREDENTIALS")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("GOOGLE_APPLICATION_CREDENTIALS must be set"))?;

        let drive_folder_id = var("DRIVE_FOLDER_ID")
            .ok_or_else(|| anyhow::anyhow!("DRIVE_FOLDER_ID must be set"))?;

        let max_file_size_mb = match var("MAX_FILE_SIZE_MB") {
            Some(v) => v
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_MB must be a number"))?,
            None => MAX_FILE_SIZE_MB,
        };
        if !max_file_size_mb.is_finite() || max_file_size_mb <= 0.0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        let allowed_mime = var("ALLOWED_MIME")
            .unwrap_or_else(|| ALLOWED_MIME.to_string())
            .parse::<MimeRule>()?;

        let upload_timeout_secs = match var("UPLOAD_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("UPLOAD_TIMEOUT_SECS must be a whole number"))?,
            None => UPLOAD_TIMEOUT_SECS,
        };

        let config = Config {
            server_port: match var("PORT") {
                Some(v) => v
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            environment,
            credentials_path,
            drive_folder_id,
            drive_api_base_url: var("DRIVE_API_BASE_URL")
                .unwrap_or_else(|| DRIVE_API_BASE_URL.to_string()),
            max_file_size_bytes: (max_file_size_mb * 1024.0 * 1024.0) as u64,
            allowed_mime,
            upload_dir: PathBuf::from(var("UPLOAD_DIR").unwrap_or_else(|| UPLOAD_DIR.to_string())),
            public_dir: PathBuf::from(var("PUBLIC_DIR").unwrap_or_else(|| PUBLIC_DIR.to_string())),
            upload_timeout: Duration::from_secs(upload_timeout_secs),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.upload_timeout.is_zero() {
            return Err(anyhow::anyhow!("UPLOAD_TIMEOUT_SECS must be greater than 0"));
        }

        if !self.drive_api_base_url.starts_with("http://")
            && !self.drive_api_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "DRIVE_API_BASE_URL must be an http(s) URL"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_file_size_mb(&self) -> f64 {
        self.max_file_size_bytes as f64 / (1024.0 * 1024.0)
    }
}
