//! Profile repository over the document store
//!
//! Profiles live in the `users` collection, keyed by the principal uid.
//! The email field is the lookup key for session sync and is stored
//! lower-cased.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use hubgate_core::ProfileRepository;
use hubgate_domain::{Profile, Result};
use serde_json::json;
use tracing::warn;

use super::client::{DocQuery, DocStoreClient};

const COLLECTION: &str = "users";

/// Document-store implementation of `ProfileRepository`
pub struct DocProfileRepository {
    client: Arc<DocStoreClient>,
}

impl DocProfileRepository {
    /// Create a new repository instance
    pub fn new(client: Arc<DocStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for DocProfileRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let matches: Vec<Profile> =
            self.client.query(COLLECTION, &DocQuery::new().where_eq("email", email)).await?;

        if matches.len() > 1 {
            // One profile per principal is an invariant the store should
            // uphold; surface a breach loudly but still answer.
            warn!(email, count = matches.len(), "multiple profiles share an email");
        }
        Ok(matches.into_iter().next())
    }

    async fn get(&self, uid: &str) -> Result<Option<Profile>> {
        self.client.get_doc(COLLECTION, uid).await
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        self.client.query(COLLECTION, &DocQuery::new()).await
    }

    async fn create(&self, profile: Profile) -> Result<()> {
        // Keyed by the principal uid rather than a server-assigned id.
        self.client.put_doc(COLLECTION, &profile.uid, &profile).await
    }

    async fn update(&self, profile: Profile) -> Result<()> {
        self.client.patch_doc(COLLECTION, &profile.uid, &profile).await
    }

    async fn set_active(&self, uid: &str, active: bool) -> Result<()> {
        self.client
            .patch_doc(
                COLLECTION,
                uid,
                &json!({
                    "status": active,
                    "metadata": { "lastStatusChange": Utc::now() },
                }),
            )
            .await
    }

    async fn delete(&self, uid: &str) -> Result<()> {
        self.client.delete_doc(COLLECTION, uid).await
    }
}
