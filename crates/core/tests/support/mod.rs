//! Mock port implementations for testing
//!
//! Provides in-memory mocks for the identity provider, repositories, and
//! the local profile cache, enabling deterministic tests without any
//! hosted backend.

#![allow(dead_code)]

pub mod identity;
pub mod repositories;

pub use identity::MockIdentityProvider;
pub use repositories::{
    MockProfileCache, MockProfileRepository, MockRegistrationRepository,
};

use chrono::Utc;
use hubgate_domain::{ApprovalMetadata, Profile, Role};

/// Build a minimal active profile for tests.
pub fn test_profile(uid: &str, email: &str, role: Role) -> Profile {
    Profile {
        uid: uid.to_string(),
        full_name: "Test User".to_string(),
        email: email.to_string(),
        organization: "Acme".to_string(),
        role,
        active: true,
        metadata: ApprovalMetadata {
            approved_by: "root@acme.io".to_string(),
            approved_at: Utc::now(),
            requested_at: None,
            last_status_change: None,
        },
    }
}
