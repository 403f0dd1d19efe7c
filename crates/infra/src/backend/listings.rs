//! Service listing repository over the document store
//!
//! Partner-submitted listings, queried by submitter email. Review-state
//! handling (edits dropping a listing back to pending) belongs to the
//! callers; this adapter only persists.

use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::ListingRepository;
use hubgate_domain::{Result, ServiceListing};

use super::client::{DocQuery, DocStoreClient};

const COLLECTION: &str = "service_listings";

/// Document-store implementation of `ListingRepository`
pub struct DocListingRepository {
    client: Arc<DocStoreClient>,
}

impl DocListingRepository {
    /// Create a new repository instance
    pub fn new(client: Arc<DocStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingRepository for DocListingRepository {
    async fn list_by_submitter(&self, email: &str) -> Result<Vec<ServiceListing>> {
        self.client
            .query(COLLECTION, &DocQuery::new().where_eq("submittedBy", email))
            .await
    }

    async fn create(&self, listing: ServiceListing) -> Result<ServiceListing> {
        self.client.create_doc(COLLECTION, &listing).await
    }

    async fn update(&self, listing: ServiceListing) -> Result<()> {
        self.client.patch_doc(COLLECTION, &listing.id, &listing).await
    }
}
