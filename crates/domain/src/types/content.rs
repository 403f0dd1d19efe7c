//! Content records managed through the portal
//!
//! These mirror the hosted document collections the admin screens operate
//! on: inbound contact messages, the curated partner directory,
//! partner-submitted service listings, and blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sort direction for timestamp-ordered listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

/// Inbound contact message (`messages` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    /// Services the sender expressed interest in
    #[serde(default)]
    pub service_interest: Vec<String>,
    #[serde(default)]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Curated partner entry (`partners` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    /// Short tagline shown under the name
    pub sub: String,
    pub desc: String,
    pub link: String,
    /// Accent color (hex)
    pub theme: String,
    #[serde(default)]
    pub features: Vec<PartnerFeature>,
    /// Public URL of the uploaded image asset
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Labelled feature bullet with its icon name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerFeature {
    pub label: String,
    pub icon: String,
}

/// Review state of a partner-submitted listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Approved,
}

/// Partner-submitted service listing (`service_listings` collection).
///
/// Members manage their own listings; any edit drops the listing back to
/// `pending` for re-review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListing {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub sub: String,
    pub desc: String,
    pub link: String,
    pub theme: String,
    #[serde(default)]
    pub features: Vec<PartnerFeature>,
    #[serde(default)]
    pub image: String,
    pub organization: String,
    /// Submitter email; listings are queried by this key
    pub submitted_by: String,
    pub submitter_name: String,
    pub status: ListingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Publication state of a blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Active,
    Archived,
}

impl BlogStatus {
    /// The other state; used by the publish/archive toggle
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Archived,
            Self::Archived => Self::Active,
        }
    }
}

/// Blog post (`blog_posts` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Rendered HTML body from the editor
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: String,
    pub author_name: String,
    pub author_email: String,
    #[serde(default)]
    pub author_avatar: String,
    pub status: BlogStatus,
    #[serde(default)]
    pub views: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
