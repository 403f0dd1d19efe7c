//! Application configuration structures
//!
//! All durable state lives in the hosted backend, so configuration is
//! limited to backend endpoints/credentials, the local HTTP listener, the
//! keyring slot used for the cached profile, and the reply template used
//! by the messages screen.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosted backend endpoints and credentials
    pub backend: BackendConfig,
    /// Local HTTP listener
    #[serde(default)]
    pub server: ServerConfig,
    /// Local profile cache slot
    #[serde(default)]
    pub cache: CacheConfig,
    /// Reply template for inbound messages
    #[serde(default)]
    pub reply: ReplyTemplate,
}

/// Hosted backend endpoints and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Identity provider base URL (e.g. "https://identity.example.com")
    pub identity_url: String,
    /// Document store base URL
    pub docstore_url: String,
    /// Object storage base URL
    pub storage_url: String,
    /// API key sent with every backend request
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Local HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8787 }
    }
}

/// Keyring slot holding the serialized profile blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Keyring service name
    pub service: String,
    /// Keyring entry name for the cached profile
    pub entry: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { service: "Hubgate".to_string(), entry: "profile.cache".to_string() }
    }
}

/// Subject/body template for replying to inbound messages
///
/// `[Name]` and `[Service]` placeholders are substituted at render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyTemplate {
    pub subject: String,
    pub body: String,
}

impl Default for ReplyTemplate {
    fn default() -> Self {
        Self {
            subject: "Re: Your Inquiry to Our Team".to_string(),
            body: "Hi [Name],\n\nThank you for reaching out regarding [Service]. \
                   We have received your message and would love to discuss this \
                   further.\n\nBest regards,\nAdmin Team"
                .to_string(),
        }
    }
}

const fn default_timeout_seconds() -> u64 {
    30
}
