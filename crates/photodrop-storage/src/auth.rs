//! Access tokens for the Drive API
//!
//! Service accounts authenticate with the OAuth 2.0 JWT bearer grant: an RS256
//! assertion signed with the account's private key is exchanged at the key's
//! `token_uri` for a short-lived access token. Tokens are cached and reused until
//! shortly before they expire.

use crate::traits::{StorageError, StorageResult};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;
use tokio::sync::RwLock;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens closer than this to expiry are refreshed
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Source of bearer tokens for provider requests
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> StorageResult<String>;
}

/// The fields of a Google service account JSON key the relay needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub async fn from_file(path: &Path) -> StorageResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> StorageResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            StorageError::ConfigError(format!("Invalid service account key: {}", e))
        })
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Token provider backed by a service account key
pub struct ServiceAccountTokenProvider {
    http_client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    cache: RwLock<Option<CachedToken>>,
}

impl Debug for ServiceAccountTokenProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ServiceAccountTokenProvider")
            .field("key", &self.key)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountTokenProvider {
    /// Create a provider; fails when the private key is not a valid RSA PEM.
    pub fn new(
        key: ServiceAccountKey,
        scope: impl Into<String>,
        http_client: reqwest::Client,
    ) -> StorageResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            StorageError::ConfigError(format!("Invalid service account private key: {}", e))
        })?;

        Ok(Self {
            http_client,
            key,
            encoding_key,
            scope: scope.into(),
            cache: RwLock::new(None),
        })
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> StorageResult<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| StorageError::AuthFailed(format!("Failed to sign assertion: {}", e)))
    }

    async fn fetch_token(&self) -> StorageResult<CachedToken> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;

        let response = self
            .http_client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::AuthFailed(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            StorageError::AuthFailed(format!("Invalid token endpoint response: {}", e))
        })?;

        tracing::debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Obtained Drive access token"
        );

        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> StorageResult<String> {
        if let Some(token) = self.cache.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(token) = cache.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *cache = Some(token);
        Ok(value)
    }
}
