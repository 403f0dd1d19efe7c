//! Partner directory repository over the document store

use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::PartnerRepository;
use hubgate_domain::{Partner, Result};

use super::client::{DocQuery, DocStoreClient};

const COLLECTION: &str = "partners";

/// Document-store implementation of `PartnerRepository`
pub struct DocPartnerRepository {
    client: Arc<DocStoreClient>,
}

impl DocPartnerRepository {
    /// Create a new repository instance
    pub fn new(client: Arc<DocStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PartnerRepository for DocPartnerRepository {
    async fn list(&self) -> Result<Vec<Partner>> {
        self.client.query(COLLECTION, &DocQuery::new()).await
    }

    async fn get(&self, id: &str) -> Result<Option<Partner>> {
        self.client.get_doc(COLLECTION, id).await
    }

    async fn create(&self, partner: Partner) -> Result<Partner> {
        self.client.create_doc(COLLECTION, &partner).await
    }

    async fn update(&self, partner: Partner) -> Result<()> {
        self.client.patch_doc(COLLECTION, &partner.id, &partner).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_doc(COLLECTION, id).await
    }
}
