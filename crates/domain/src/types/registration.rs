//! Registration request types
//!
//! A pending, unauthenticated ask for a profile to be created. Requests
//! are short-lived: resolution deletes the record, it is never
//! transitioned in place.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// Pending registration stored in the `registration_requests` collection.
///
/// The caller-supplied credential secret is held only while the request is
/// pending (the approval step needs it to create the principal) and is
/// redacted from `Debug` output so it never reaches logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Store-assigned document id; empty until persisted
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub organization: String,
    pub requested_role: Role,
    /// Caller-supplied credential, stored under the legacy `password` key
    #[serde(rename = "password")]
    pub secret: String,
    /// Always `"pending"` while the record exists
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,
}

impl RegistrationRequest {
    /// Build a new pending request ready for submission.
    ///
    /// The id and `requested_at` timestamp are assigned by the store.
    #[must_use]
    pub fn pending(
        full_name: impl Into<String>,
        email: impl Into<String>,
        organization: impl Into<String>,
        requested_role: Role,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            full_name: full_name.into(),
            email: email.into(),
            organization: organization.into(),
            requested_role,
            secret: secret.into(),
            status: "pending".to_string(),
            requested_at: None,
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("organization", &self.organization)
            .field("requested_role", &self.requested_role)
            .field("secret", &"<redacted>")
            .field("status", &self.status)
            .field("requested_at", &self.requested_at)
            .finish()
    }
}
