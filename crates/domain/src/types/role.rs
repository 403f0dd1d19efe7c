//! Role enumeration
//!
//! Roles are a closed set compared by exact membership against a view's
//! allow-set. There is no hierarchy: `Admin` does not imply `Lead`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HubgateError;

/// Authorization role carried by a [`Profile`](crate::Profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Internal operations staff
    Lead,
    /// External partner member; lands on the self-service view
    Member,
}

impl Role {
    /// Whether this role belongs to internal staff (`Admin` or `Lead`)
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin | Self::Lead)
    }

    /// Stable string form, matching the stored document field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Lead => "Lead",
            Self::Member => "Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = HubgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Lead" => Ok(Self::Lead),
            "Member" => Ok(Self::Member),
            other => Err(HubgateError::InvalidInput(format!("unknown role: {other}"))),
        }
    }
}
