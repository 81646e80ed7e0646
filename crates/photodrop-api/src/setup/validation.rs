//! Configuration validation
//!
//! Checks what can only be verified against the filesystem at startup.

use anyhow::{Context, Result};
use photodrop_core::Config;

/// Validate startup configuration and create the temp upload directory
///
/// # Arguments
/// * `config` - Application configuration to validate
///
/// # Returns
/// Ok(()) if validation passes, Err with details if validation fails
pub async fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.upload_dir.display()
            )
        })?;

    match tokio::fs::metadata(&config.credentials_path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            return Err(anyhow::anyhow!(
                "GOOGLE_APPLICATION_CREDENTIALS does not point to a file: {}",
                config.credentials_path.display()
            ));
        }
        Err(e) => {
            return Err(anyhow::anyhow!(
                "GOOGLE_APPLICATION_CREDENTIALS is not readable ({}): {}",
                config.credentials_path.display(),
                e
            ));
        }
    }

    if !tokio::fs::try_exists(&config.public_dir).await.unwrap_or(false) {
        tracing::warn!(
            public_dir = %config.public_dir.display(),
            "Public directory does not exist; static files will return 404"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &std::path::Path, credentials: &std::path::Path) -> Config {
        let upload_dir = dir.join("nested").join("uploads");
        let credentials = credentials.to_string_lossy().to_string();
        Config::from_lookup(|key| match key {
            "GOOGLE_APPLICATION_CREDENTIALS" => Some(credentials.clone()),
            "DRIVE_FOLDER_ID" => Some("folder-1".to_string()),
            "UPLOAD_DIR" => Some(upload_dir.to_string_lossy().to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_creates_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let credentials = dir.path().join("key.json");
        std::fs::write(&credentials, "{}").unwrap();

        let config = config(dir.path(), &credentials);
        validate_config(&config).await.unwrap();
        assert!(config.upload_dir.is_dir());
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), &dir.path().join("missing.json"));

        let err = validate_config(&config).await.unwrap_err();
        assert!(err.to_string().contains("GOOGLE_APPLICATION_CREDENTIALS"));
    }

    #[tokio::test]
    async fn test_credentials_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), dir.path());

        assert!(validate_config(&config).await.is_err());
    }
}
