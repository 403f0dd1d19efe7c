//! Port interfaces for the content collections and object storage

use async_trait::async_trait;
use hubgate_domain::{
    BlogPost, BlogStatus, ContactMessage, Partner, Result, ServiceListing, SortOrder,
};

/// Trait for inbound contact messages.
///
/// Messages arrive from the public site; the portal only reads and
/// deletes them.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// List all messages ordered by timestamp
    async fn list(&self, order: SortOrder) -> Result<Vec<ContactMessage>>;

    /// Delete a message
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Trait for the curated partner directory
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Partner>>;

    async fn get(&self, id: &str) -> Result<Option<Partner>>;

    /// Persist a new partner, returning it with its assigned id
    async fn create(&self, partner: Partner) -> Result<Partner>;

    async fn update(&self, partner: Partner) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Trait for partner-submitted service listings
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// List the listings submitted by one member, keyed by email
    async fn list_by_submitter(&self, email: &str) -> Result<Vec<ServiceListing>>;

    /// Persist a new listing, returning it with its assigned id
    async fn create(&self, listing: ServiceListing) -> Result<ServiceListing>;

    /// Update a listing. Edits drop the listing back to pending review;
    /// callers set the status before updating.
    async fn update(&self, listing: ServiceListing) -> Result<()>;
}

/// Trait for blog post persistence
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// List all posts, newest first
    async fn list(&self) -> Result<Vec<BlogPost>>;

    async fn get(&self, id: &str) -> Result<Option<BlogPost>>;

    /// Persist a new post, returning it with its assigned id
    async fn create(&self, post: BlogPost) -> Result<BlogPost>;

    async fn update(&self, post: BlogPost) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Flip a post between live and archived
    async fn set_status(&self, id: &str, status: BlogStatus) -> Result<()>;
}

/// Trait for the hosted object storage used for image assets
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload raw bytes under `path`, returning the public URL
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}
