//! Google Drive v3 adapter

pub mod auth;

pub use auth::{ServiceAccountKey, TokenProvider};

use async_trait::async_trait;
use paradero_core::error::{ParaderoError, Result};
use paradero_core::models::{DriveFile, Lookup, SearchScope};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{AccessInfo, FileStore};
use crate::query::{filter_images, images_params, is_file_id, media_url, resolve_params};

pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Environment variable holding the service-account JSON
pub const CREDENTIALS_ENV: &str = "GOOGLE_CREDENTIALS";

enum Credentials {
    ServiceAccount(TokenProvider),
    /// Pre-issued bearer token
    Static { token: String, account: Option<String> },
    /// Why no credentials are available; reported on every call
    Missing(String),
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Drive v3 file store
pub struct DriveGateway {
    client: reqwest::Client,
    api_base: String,
    credentials: Credentials,
}

impl DriveGateway {
    /// Build from `GOOGLE_CREDENTIALS`.
    ///
    /// Missing or malformed credentials do not fail construction; every
    /// call then fails authentication so the service can still start.
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let client = build_client(timeout)?;
        let credentials = match std::env::var(CREDENTIALS_ENV) {
            Ok(raw) if !raw.trim().is_empty() => match ServiceAccountKey::from_json(&raw) {
                Ok(key) => {
                    tracing::info!(account = %key.client_email, "Drive service account loaded");
                    Credentials::ServiceAccount(TokenProvider::new(key, client.clone()))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Drive credentials rejected");
                    Credentials::Missing(e.to_string())
                }
            },
            _ => {
                tracing::warn!("{} not set, Drive calls will fail", CREDENTIALS_ENV);
                Credentials::Missing(format!("{} not found", CREDENTIALS_ENV))
            }
        };

        Ok(Self {
            client,
            api_base: DRIVE_API_BASE.to_string(),
            credentials,
        })
    }

    pub fn with_service_account(key: ServiceAccountKey, timeout: Duration) -> Result<Self> {
        let client = build_client(timeout)?;
        Ok(Self {
            credentials: Credentials::ServiceAccount(TokenProvider::new(key, client.clone())),
            client,
            api_base: DRIVE_API_BASE.to_string(),
        })
    }

    /// Use a fixed bearer token, mainly for pointing at a local test server
    pub fn with_static_token(token: impl Into<String>, account: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: DRIVE_API_BASE.to_string(),
            credentials: Credentials::Static {
                token: token.into(),
                account,
            },
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    async fn access_token(&self) -> Result<String> {
        match &self.credentials {
            Credentials::ServiceAccount(provider) => provider.token().await,
            Credentials::Static { token, .. } => Ok(token.clone()),
            Credentials::Missing(reason) => Err(ParaderoError::Authentication {
                service: "Drive".to_string(),
                reason: reason.clone(),
            }),
        }
    }

    /// Authenticated GET; any failure before a response arrives is a reason string
    async fn get(&self, url: Url) -> std::result::Result<reqwest::Response, String> {
        let token = self.access_token().await.map_err(|e| e.to_string())?;
        self.client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| format!("Drive request failed: {}", e))
    }

    async fn list_files(&self, params: Vec<(&'static str, String)>) -> Lookup<Vec<DriveFile>> {
        let url = match Url::parse_with_params(
            &format!("{}/files", self.api_base),
            params.iter().map(|(k, v)| (*k, v.as_str())),
        ) {
            Ok(url) => url,
            Err(e) => return Lookup::TransportError(format!("Invalid Drive URL: {}", e)),
        };

        let response = match self.get(url).await {
            Ok(response) => response,
            Err(reason) => return Lookup::TransportError(reason),
        };

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Lookup::TransportError(format!("Drive API error ({}): {}", status, error_text));
        }

        match response.json::<FileList>().await {
            Ok(list) => Lookup::Found(list.files),
            Err(e) => Lookup::TransportError(format!("Failed to parse Drive response: {}", e)),
        }
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ParaderoError::upstream("Drive", format!("Failed to build HTTP client: {}", e)))
}

#[async_trait]
impl FileStore for DriveGateway {
    async fn check_access(&self) -> Result<AccessInfo> {
        self.access_token().await?;
        let account = match &self.credentials {
            Credentials::ServiceAccount(provider) => Some(provider.account().to_string()),
            Credentials::Static { account, .. } => account.clone(),
            Credentials::Missing(_) => None,
        };
        Ok(AccessInfo { account })
    }

    async fn resolve_id(&self, query: &str, scope: &SearchScope) -> Lookup<String> {
        let lookup = self
            .list_files(resolve_params(query, scope))
            .await
            .map(|files| files.into_iter().next().map(|f| f.id));

        match lookup {
            Lookup::Found(Some(id)) => Lookup::Found(id),
            Lookup::Found(None) | Lookup::NotFound => {
                tracing::debug!(query = %query, "No Drive file matched");
                Lookup::NotFound
            }
            Lookup::TransportError(reason) => {
                tracing::error!(query = %query, error = %reason, "Drive lookup failed");
                Lookup::TransportError(reason)
            }
        }
    }

    async fn list_images(&self, folder_id: &str) -> Lookup<Vec<DriveFile>> {
        let lookup = self.list_files(images_params(folder_id)).await.map(filter_images);
        match &lookup {
            Lookup::Found(images) => {
                tracing::info!(folder_id = %folder_id, count = images.len(), "Images listed")
            }
            Lookup::NotFound => {}
            Lookup::TransportError(reason) => {
                tracing::error!(folder_id = %folder_id, error = %reason, "Image listing failed")
            }
        }
        lookup
    }

    async fn download(&self, file_id: &str) -> Lookup<Vec<u8>> {
        if !is_file_id(file_id) {
            tracing::warn!(file_id = %file_id, "Rejected malformed file id");
            return Lookup::NotFound;
        }
        let url = match media_url(&self.api_base, file_id) {
            Ok(url) => url,
            Err(reason) => return Lookup::TransportError(reason),
        };

        let response = match self.get(url).await {
            Ok(response) => response,
            Err(reason) => {
                tracing::error!(file_id = %file_id, error = %reason, "Download failed");
                return Lookup::TransportError(reason);
            }
        };

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::warn!(file_id = %file_id, "File not found in Drive");
                Lookup::NotFound
            }
            status if !status.is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                tracing::error!(file_id = %file_id, %status, "Download rejected");
                Lookup::TransportError(format!("Drive API error ({}): {}", status, error_text))
            }
            _ => match response.bytes().await {
                Ok(bytes) => {
                    tracing::debug!(file_id = %file_id, size = bytes.len(), "File downloaded");
                    Lookup::Found(bytes.to_vec())
                }
                Err(e) => {
                    tracing::error!(file_id = %file_id, error = %e, "Download interrupted");
                    Lookup::TransportError(format!("Drive download interrupted: {}", e))
                }
            },
        }
    }
}
