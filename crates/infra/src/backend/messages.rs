//! Contact message repository over the document store
//!
//! Messages are written by the public site; the portal reads them
//! timestamp-ordered and deletes handled ones.

use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::MessageRepository;
use hubgate_domain::{ContactMessage, Result, SortOrder};

use super::client::{DocQuery, DocStoreClient};

const COLLECTION: &str = "messages";

/// Document-store implementation of `MessageRepository`
pub struct DocMessageRepository {
    client: Arc<DocStoreClient>,
}

impl DocMessageRepository {
    /// Create a new repository instance
    pub fn new(client: Arc<DocStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageRepository for DocMessageRepository {
    async fn list(&self, order: SortOrder) -> Result<Vec<ContactMessage>> {
        self.client
            .query(COLLECTION, &DocQuery::new().order_by("timestamp", order))
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_doc(COLLECTION, id).await
    }
}
