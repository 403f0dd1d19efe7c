//! Port interfaces for profile and registration-request persistence
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations for the `users` and
//! `registration_requests` collections.

use async_trait::async_trait;
use hubgate_domain::{Profile, RegistrationRequest, Result};

/// Trait for profile persistence and retrieval
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get a profile by lower-cased email. Callers must lower-case the key.
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>>;

    /// Get a profile by principal uid
    async fn get(&self, uid: &str) -> Result<Option<Profile>>;

    /// List every profile in the roster
    async fn list(&self) -> Result<Vec<Profile>>;

    /// Create a new profile keyed by its principal uid
    async fn create(&self, profile: Profile) -> Result<()>;

    /// Update an existing profile
    async fn update(&self, profile: Profile) -> Result<()>;

    /// Toggle the active flag, stamping the status-change timestamp
    async fn set_active(&self, uid: &str, active: bool) -> Result<()>;

    /// Delete a profile, permanently revoking access
    async fn delete(&self, uid: &str) -> Result<()>;
}

/// Trait for pending registration requests.
///
/// Requests are only ever created and deleted; resolution never mutates
/// the record in place.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// List all pending requests (the administrators' work list)
    async fn list_pending(&self) -> Result<Vec<RegistrationRequest>>;

    /// Get a single pending request by id
    async fn get(&self, id: &str) -> Result<Option<RegistrationRequest>>;

    /// Persist a new pending request, returning it with its assigned id
    async fn create(&self, request: RegistrationRequest) -> Result<RegistrationRequest>;

    /// Delete a request. Deleting a missing request is an error: the
    /// delete doubles as the approval workflow's mutual exclusion.
    async fn delete(&self, id: &str) -> Result<()>;
}
