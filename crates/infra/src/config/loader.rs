//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `HUBGATE_IDENTITY_URL`: Identity provider base URL
//! - `HUBGATE_DOCSTORE_URL`: Document store base URL
//! - `HUBGATE_STORAGE_URL`: Object storage base URL
//! - `HUBGATE_API_KEY`: Backend API key
//! - `HUBGATE_TIMEOUT_SECONDS`: Backend request timeout (optional)
//! - `HUBGATE_HOST` / `HUBGATE_PORT`: Local HTTP listener (optional)
//! - `HUBGATE_CACHE_SERVICE` / `HUBGATE_CACHE_ENTRY`: Keyring slot
//!   (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./hubgate.json` or `./hubgate.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use hubgate_domain::{
    BackendConfig, CacheConfig, Config, HubgateError, ReplyTemplate, Result, ServerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `HubgateError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `HubgateError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let identity_url = env_var("HUBGATE_IDENTITY_URL")?;
    let docstore_url = env_var("HUBGATE_DOCSTORE_URL")?;
    let storage_url = env_var("HUBGATE_STORAGE_URL")?;
    let api_key = env_var("HUBGATE_API_KEY")?;

    let timeout_seconds = match std::env::var("HUBGATE_TIMEOUT_SECONDS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| HubgateError::Config(format!("Invalid timeout: {e}")))?,
        Err(_) => 30,
    };

    let mut server = ServerConfig::default();
    if let Ok(host) = std::env::var("HUBGATE_HOST") {
        server.host = host;
    }
    if let Ok(raw) = std::env::var("HUBGATE_PORT") {
        server.port =
            raw.parse::<u16>().map_err(|e| HubgateError::Config(format!("Invalid port: {e}")))?;
    }

    let mut cache = CacheConfig::default();
    if let Ok(service) = std::env::var("HUBGATE_CACHE_SERVICE") {
        cache.service = service;
    }
    if let Ok(entry) = std::env::var("HUBGATE_CACHE_ENTRY") {
        cache.entry = entry;
    }

    Ok(Config {
        backend: BackendConfig { identity_url, docstore_url, storage_url, api_key, timeout_seconds },
        server,
        cache,
        reply: ReplyTemplate::default(),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `HubgateError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HubgateError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HubgateError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HubgateError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HubgateError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HubgateError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(HubgateError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    for stem in ["config", "hubgate"] {
        for ext in ["json", "toml"] {
            candidates.push(PathBuf::from(format!("./{stem}.{ext}")));
        }
    }
    for ext in ["json", "toml"] {
        candidates.push(PathBuf::from(format!("../config.{ext}")));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            for ext in ["json", "toml"] {
                candidates.push(dir.join(format!("config.{ext}")));
            }
        }
    }

    candidates.into_iter().find(|p| p.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| HubgateError::Config(format!("Missing environment variable: {name}")))
}
