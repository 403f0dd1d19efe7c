//! Object storage client
//!
//! Uploads image assets to the hosted object store and returns their
//! public URLs. Paths are namespaced by the caller (e.g. `partners/…`,
//! `blog_assets/…`).

use std::time::Duration;

use async_trait::async_trait;
use hubgate_core::ObjectStorage;
use hubgate_domain::{BackendConfig, HubgateError, Result};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP implementation of the `ObjectStorage` port
#[derive(Debug, Clone)]
pub struct HttpObjectStorage {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpObjectStorage {
    /// Create a new object storage client
    ///
    /// # Errors
    /// Returns `HubgateError::Config` if the underlying HTTP client cannot
    /// be built.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HubgateError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string(), api_key })
    }

    /// Create a client from the application backend configuration
    ///
    /// # Errors
    /// Returns `HubgateError::Config` if the underlying HTTP client cannot
    /// be built.
    pub fn from_backend_config(backend: &BackendConfig) -> Result<Self> {
        Self::new(
            backend.storage_url.clone(),
            backend.api_key.clone(),
            Duration::from_secs(backend.timeout_seconds),
        )
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = format!("{}/upload/{}", self.base_url, path.trim_start_matches('/'));
        debug!(%url, size = bytes.len(), "asset upload");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| HubgateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HubgateError::Backend(format!("upload failed ({status}): {body}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| HubgateError::Backend(format!("failed to parse upload response: {e}")))?;

        info!(path, url = %uploaded.url, "asset uploaded");
        Ok(uploaded.url)
    }
}
