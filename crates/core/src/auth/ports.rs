//! Port interfaces for the hosted identity provider and the local profile
//! cache
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for authentication state.

use async_trait::async_trait;
use hubgate_domain::{Principal, Profile, Result};
use tokio::sync::broadcast;

/// Trait for the hosted identity provider.
///
/// The provider owns a single active session per process; auth-state
/// changes (sign-in, sign-out, account creation) are pushed to
/// subscribers as `Option<Principal>` notifications.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a credential and switch the active session to that principal.
    ///
    /// Subscribers receive the new principal as a notification.
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Principal>;

    /// Create a new account with the given credential.
    ///
    /// Contract: on success the provider's active session **switches to
    /// the newly created principal** (and subscribers are notified), a
    /// side effect of the hosted account-creation call. Callers that must
    /// keep their own session are responsible for re-authenticating
    /// afterwards.
    async fn create_principal(&self, email: &str, secret: &str) -> Result<Principal>;

    /// Permanently delete a principal. Used to compensate a failed
    /// approval after account creation already succeeded.
    async fn delete_principal(&self, principal: &Principal) -> Result<()>;

    /// End the active session. Subscribers receive a null notification.
    async fn sign_out(&self) -> Result<()>;

    /// Subscribe to auth-state-change notifications.
    ///
    /// Fires with `Some(principal)` on sign-in (and on the account-creation
    /// session switch), `None` on sign-out.
    fn subscribe(&self) -> broadcast::Receiver<Option<Principal>>;

    /// The principal of the provider's current active session, if any
    fn current_principal(&self) -> Option<Principal>;
}

/// Trait for the local persistent profile cache.
///
/// Holds at most one serialized profile under a fixed name, surviving
/// process restarts on the same device so protected UI can render before
/// the first network round trip. Operations are synchronous: the session
/// cache seeds from here during construction.
pub trait ProfileCache: Send + Sync {
    /// Load the cached profile, if one is stored.
    fn load(&self) -> Result<Option<Profile>>;

    /// Overwrite the cached profile.
    fn store(&self, profile: &Profile) -> Result<()>;

    /// Remove the cached profile. Removing an absent entry is not an error.
    fn clear(&self) -> Result<()>;
}
