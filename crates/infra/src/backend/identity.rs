//! Identity provider client
//!
//! REST adapter for the hosted identity service. The provider owns a
//! single active session per process; every successful credential
//! operation updates that session and pushes a notification to
//! subscribers, mirroring the hosted SDK's auth-state-change stream.
//!
//! Account creation switches the active session to the new principal —
//! the side effect the approval workflow compensates for with its final
//! re-authentication step.

use std::time::Duration;

use async_trait::async_trait;
use hubgate_core::IdentityProvider;
use hubgate_domain::{BackendConfig, HubgateError, Principal, Result};
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Capacity of the auth notification channel; events are tiny and
/// consumers drain them promptly.
const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Serialize)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AccountResponse {
    #[serde(rename = "localId")]
    local_id: String,
    email: String,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    #[serde(rename = "localId")]
    local_id: &'a str,
}

/// REST-backed implementation of the `IdentityProvider` port
pub struct RestIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    current: Mutex<Option<Principal>>,
    events: broadcast::Sender<Option<Principal>>,
}

impl RestIdentityProvider {
    /// Create a new identity provider client
    ///
    /// # Errors
    /// Returns `HubgateError::Config` if the underlying HTTP client cannot
    /// be built.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HubgateError::Config(format!("failed to build HTTP client: {e}")))?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            current: Mutex::new(None),
            events,
        })
    }

    /// Create a client from the application backend configuration
    ///
    /// # Errors
    /// Returns `HubgateError::Config` if the underlying HTTP client cannot
    /// be built.
    pub fn from_backend_config(backend: &BackendConfig) -> Result<Self> {
        Self::new(
            backend.identity_url.clone(),
            backend.api_key.clone(),
            Duration::from_secs(backend.timeout_seconds),
        )
    }

    async fn credential_call(&self, endpoint: &str, email: &str, secret: &str) -> Result<Principal> {
        let url = format!("{}/v1/accounts:{endpoint}", self.base_url);
        debug!(%url, %email, "identity request");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&CredentialRequest { email, password: secret })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HubgateError::Network("identity request timed out".to_string())
                } else {
                    HubgateError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                    HubgateError::Auth(auth_error_label(&body))
                }
                s if s.is_server_error() => {
                    HubgateError::Network(format!("identity provider unavailable ({s})"))
                }
                s => HubgateError::Auth(format!("unexpected status {s}: {body}")),
            });
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| HubgateError::Backend(format!("failed to parse account response: {e}")))?;

        Ok(Principal { uid: account.local_id, email: account.email })
    }

    fn switch_session(&self, principal: Principal) {
        *self.current.lock() = Some(principal.clone());
        let _ = self.events.send(Some(principal));
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Principal> {
        let principal = self.credential_call("signInWithPassword", email, secret).await?;
        info!(email = %principal.email, "signed in");
        self.switch_session(principal.clone());
        Ok(principal)
    }

    async fn create_principal(&self, email: &str, secret: &str) -> Result<Principal> {
        let principal = self.credential_call("signUp", email, secret).await?;
        info!(email = %principal.email, uid = %principal.uid, "account created");

        // The hosted account-creation call signs the new account in; the
        // active session switches and subscribers are notified.
        self.switch_session(principal.clone());
        Ok(principal)
    }

    async fn delete_principal(&self, principal: &Principal) -> Result<()> {
        let url = format!("{}/v1/accounts:delete", self.base_url);
        debug!(%url, uid = %principal.uid, "identity delete");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&DeleteRequest { local_id: &principal.uid })
            .send()
            .await
            .map_err(|e| HubgateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => {
                    HubgateError::NotFound(format!("no account: {}", principal.uid))
                }
                s => HubgateError::Backend(format!("account delete failed ({s}): {body}")),
            });
        }

        let mut current = self.current.lock();
        if current.as_ref().is_some_and(|p| p.uid == principal.uid) {
            *current = None;
            drop(current);
            let _ = self.events.send(None);
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        // Sessions are client-held; signing out is a local operation.
        *self.current.lock() = None;
        let _ = self.events.send(None);
        info!("signed out");
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<Principal>> {
        self.events.subscribe()
    }

    fn current_principal(&self) -> Option<Principal> {
        self.current.lock().clone()
    }
}

impl std::fmt::Debug for RestIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestIdentityProvider")
            .field("base_url", &self.base_url)
            .field("current", &self.current.lock().as_ref().map(|p| p.email.clone()))
            .finish()
    }
}

/// Reduce provider error bodies to the stable, user-facing labels the
/// sign-in screen expects.
fn auth_error_label(body: &str) -> String {
    if body.contains("EMAIL_EXISTS") {
        "email already in use".to_string()
    } else if body.contains("WEAK_PASSWORD") {
        "credential does not meet requirements".to_string()
    } else {
        "invalid credentials".to_string()
    }
}
