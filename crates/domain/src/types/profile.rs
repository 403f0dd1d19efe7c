//! Profile types
//!
//! The application's authorization record for a principal, stored in the
//! hosted `users` collection and joined to the principal by lower-cased
//! email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// Authorization record stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Identity-provider principal id this profile belongs to
    pub uid: String,
    pub full_name: String,
    /// Lower-cased for lookup; the join key to the principal
    pub email: String,
    pub organization: String,
    pub role: Role,
    /// False means access is revoked; the gate renders a terminal notice
    #[serde(rename = "status")]
    pub active: bool,
    pub metadata: ApprovalMetadata,
}

/// Denormalized approval bookkeeping carried on every profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalMetadata {
    /// Email of the administrator who approved the registration
    pub approved_by: String,
    pub approved_at: DateTime<Utc>,
    /// Original registration request timestamp, if it was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,
    /// Set whenever an administrator toggles the active flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status_change: Option<DateTime<Utc>>,
}
