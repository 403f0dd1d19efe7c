//! Keyring-backed profile cache
//!
//! Persists the signed-in profile as serialized JSON in the platform
//! keyring (macOS Keychain, Windows Credential Manager, Linux Secret
//! Service) under a fixed service/entry name, surviving process restarts
//! on the same device. This is the cache the identity session seeds from
//! at startup so protected views can render before the first network
//! round trip.

use hubgate_core::ProfileCache;
use hubgate_domain::{CacheConfig, HubgateError, Profile, Result};
use keyring::Entry;
use tracing::debug;

/// Keyring implementation of the `ProfileCache` port
pub struct KeyringProfileCache {
    entry: Entry,
}

impl KeyringProfileCache {
    /// Create a cache writing under the given keyring service/entry pair
    ///
    /// # Errors
    /// Returns `HubgateError::Internal` if the platform keyring is
    /// unavailable.
    pub fn new(service: &str, entry: &str) -> Result<Self> {
        let entry = Entry::new(service, entry)
            .map_err(|e| HubgateError::Internal(format!("keyring entry unavailable: {e}")))?;
        Ok(Self { entry })
    }

    /// Create a cache from the application cache configuration
    ///
    /// # Errors
    /// Returns `HubgateError::Internal` if the platform keyring is
    /// unavailable.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(&config.service, &config.entry)
    }
}

impl ProfileCache for KeyringProfileCache {
    fn load(&self) -> Result<Option<Profile>> {
        match self.entry.get_password() {
            Ok(raw) => {
                let profile = serde_json::from_str(&raw).map_err(|e| {
                    HubgateError::Internal(format!("cached profile is corrupt: {e}"))
                })?;
                debug!("loaded cached profile");
                Ok(Some(profile))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(HubgateError::Internal(format!("keyring read failed: {e}"))),
        }
    }

    fn store(&self, profile: &Profile) -> Result<()> {
        let raw = serde_json::to_string(profile)
            .map_err(|e| HubgateError::Internal(format!("failed to serialize profile: {e}")))?;
        self.entry
            .set_password(&raw)
            .map_err(|e| HubgateError::Internal(format!("keyring write failed: {e}")))?;
        debug!(email = %profile.email, "cached profile");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(HubgateError::Internal(format!("keyring delete failed: {e}"))),
        }
    }
}

impl std::fmt::Debug for KeyringProfileCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringProfileCache").finish_non_exhaustive()
    }
}
