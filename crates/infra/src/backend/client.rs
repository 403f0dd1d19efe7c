//! Document store client
//!
//! HTTP client for the hosted schema-less document API. Documents are
//! flat JSON maps addressed by collection and id; the server assigns ids
//! on create and maintains the reserved `createdAt`/`updatedAt` fields.
//!
//! Endpoints:
//! - `GET    /v1/{collection}/{id}`       — point read
//! - `POST   /v1/{collection}`            — create, returns stored document
//! - `PUT    /v1/{collection}/{id}`       — create-or-replace with caller id
//! - `PATCH  /v1/{collection}/{id}`       — merge update
//! - `DELETE /v1/{collection}/{id}`       — delete
//! - `POST   /v1/{collection}:query`      — field-equality filter + ordering

use std::time::Duration;

use hubgate_domain::{BackendConfig, HubgateError, Result, SortOrder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the document store client
#[derive(Debug, Clone)]
pub struct DocStoreConfig {
    /// Base URL (e.g. "https://docs.hubgate.dev")
    pub base_url: String,
    /// API key sent as `x-api-key` with every request
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for DocStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://docs.hubgate.dev".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Field-equality query with optional ordering
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocQuery {
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    filter: Option<FieldFilter>,
    #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
    order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<SortOrder>,
}

#[derive(Debug, Clone, Serialize)]
struct FieldFilter {
    field: String,
    equals: serde_json::Value,
}

impl DocQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to documents whose `field` equals `value`
    #[must_use]
    pub fn where_eq(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.filter = Some(FieldFilter { field: field.to_string(), equals: value.into() });
        self
    }

    /// Order results by `field` in `direction`
    #[must_use]
    pub fn order_by(mut self, field: &str, direction: SortOrder) -> Self {
        self.order_by = Some(field.to_string());
        self.direction = Some(direction);
        self
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    documents: Vec<T>,
}

/// Client for the hosted document store
#[derive(Debug, Clone)]
pub struct DocStoreClient {
    http: reqwest::Client,
    config: DocStoreConfig,
}

impl DocStoreClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns `HubgateError::Config` if the underlying HTTP client cannot
    /// be built.
    pub fn new(config: DocStoreConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HubgateError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Create a client from the application backend configuration
    ///
    /// # Errors
    /// Returns `HubgateError::Config` if the underlying HTTP client cannot
    /// be built.
    pub fn from_backend_config(backend: &BackendConfig) -> Result<Self> {
        Self::new(DocStoreConfig {
            base_url: backend.docstore_url.clone(),
            api_key: backend.api_key.clone(),
            timeout: Duration::from_secs(backend.timeout_seconds),
        })
    }

    /// Point read. A 404 is not an error: the document simply does not
    /// exist.
    pub async fn get_doc<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>> {
        let url = self.doc_url(collection, id);
        debug!(%url, "docstore GET");

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_status(response, &url).await?;
        let doc = response
            .json()
            .await
            .map_err(|e| HubgateError::Backend(format!("failed to parse document: {e}")))?;
        Ok(Some(doc))
    }

    /// Create a document; the server assigns the id and timestamps and
    /// echoes the stored document back.
    pub async fn create_doc<T: Serialize, R: DeserializeOwned>(
        &self,
        collection: &str,
        body: &T,
    ) -> Result<R> {
        let url = self.collection_url(collection);
        debug!(%url, "docstore POST");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, &url).await?;
        response
            .json()
            .await
            .map_err(|e| HubgateError::Backend(format!("failed to parse stored document: {e}")))
    }

    /// Create-or-replace a document under a caller-chosen id
    pub async fn put_doc<T: Serialize>(&self, collection: &str, id: &str, body: &T) -> Result<()> {
        let url = self.doc_url(collection, id);
        debug!(%url, "docstore PUT");

        let response = self
            .http
            .put(&url)
            .header("x-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response, &url).await.map(|_| ())
    }

    /// Merge-update fields of an existing document
    pub async fn patch_doc<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        body: &T,
    ) -> Result<()> {
        let url = self.doc_url(collection, id);
        debug!(%url, "docstore PATCH");

        let response = self
            .http
            .patch(&url)
            .header("x-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response, &url).await.map(|_| ())
    }

    /// Delete a document. Deleting a missing document is an error (the
    /// approval workflow relies on delete-as-mutual-exclusion).
    pub async fn delete_doc(&self, collection: &str, id: &str) -> Result<()> {
        let url = self.doc_url(collection, id);
        debug!(%url, "docstore DELETE");

        let response = self
            .http
            .delete(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        check_status(response, &url).await.map(|_| ())
    }

    /// Run a field-equality query, returning the full result set
    pub async fn query<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: &DocQuery,
    ) -> Result<Vec<T>> {
        let url = format!("{}:query", self.collection_url(collection));
        debug!(%url, "docstore QUERY");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let response = check_status(response, &url).await?;
        let result: QueryResponse<T> = response
            .json()
            .await
            .map_err(|e| HubgateError::Backend(format!("failed to parse query result: {e}")))?;
        Ok(result.documents)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), collection)
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }
}

/// Map a transport-level failure to the domain taxonomy
fn map_transport_error(err: reqwest::Error) -> HubgateError {
    if err.is_timeout() {
        HubgateError::Network("request timed out".to_string())
    } else {
        HubgateError::Network(err.to_string())
    }
}

/// Convert a non-success status into the domain taxonomy
async fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::BAD_REQUEST => HubgateError::InvalidInput(body),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            HubgateError::Auth(format!("backend rejected credentials for {url}"))
        }
        StatusCode::NOT_FOUND => HubgateError::NotFound(url.to_string()),
        StatusCode::CONFLICT => HubgateError::Backend(format!("conflict: {body}")),
        s if s.is_server_error() => {
            HubgateError::Network(format!("backend unavailable ({s}): {body}"))
        }
        s => HubgateError::Backend(format!("unexpected status {s}: {body}")),
    })
}
