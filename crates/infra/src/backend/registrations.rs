//! Registration request repository over the document store
//!
//! Pending requests live in the `registration_requests` collection with
//! server-assigned ids. Resolution deletes the record; a failed delete of
//! a missing record surfaces as an error, which is what makes the delete
//! usable as the approval workflow's mutual exclusion.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use hubgate_core::RegistrationRepository;
use hubgate_domain::{RegistrationRequest, Result};

use super::client::{DocQuery, DocStoreClient};

const COLLECTION: &str = "registration_requests";

/// Document-store implementation of `RegistrationRepository`
pub struct DocRegistrationRepository {
    client: Arc<DocStoreClient>,
}

impl DocRegistrationRepository {
    /// Create a new repository instance
    pub fn new(client: Arc<DocStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegistrationRepository for DocRegistrationRepository {
    async fn list_pending(&self) -> Result<Vec<RegistrationRequest>> {
        self.client
            .query(COLLECTION, &DocQuery::new().where_eq("status", "pending"))
            .await
    }

    async fn get(&self, id: &str) -> Result<Option<RegistrationRequest>> {
        self.client.get_doc(COLLECTION, id).await
    }

    async fn create(&self, mut request: RegistrationRequest) -> Result<RegistrationRequest> {
        if request.requested_at.is_none() {
            request.requested_at = Some(Utc::now());
        }
        self.client.create_doc(COLLECTION, &request).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_doc(COLLECTION, id).await
    }
}
