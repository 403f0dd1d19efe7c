//! Identity provider principal and process-local session state

use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// An authenticated identity as reported by the hosted identity provider.
///
/// The application only ever reads principals; it never mutates them
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Provider-assigned unique id
    pub uid: String,
    /// Sign-in email
    pub email: String,
}

/// Process-local session state.
///
/// The profile half is authoritative for authorization decisions; a
/// principal without a matching profile is treated as unauthorized. Only
/// the profile half survives restarts (via the local cache).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub principal: Option<Principal>,
    pub profile: Option<Profile>,
    /// True while a profile lookup for the latest auth notification is in
    /// flight
    pub loading: bool,
}

impl Session {
    /// Session with no principal, no profile, and no lookup in flight
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self { principal: None, profile: None, loading: false }
    }

    /// Whether either half of the session identifies a signed-in user
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.principal.is_some() || self.profile.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::unauthenticated()
    }
}
