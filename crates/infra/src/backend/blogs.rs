//! Blog post repository over the document store

use std::sync::Arc;

use async_trait::async_trait;
use hubgate_core::BlogRepository;
use hubgate_domain::{BlogPost, BlogStatus, Result, SortOrder};
use serde_json::json;

use super::client::{DocQuery, DocStoreClient};

const COLLECTION: &str = "blog_posts";

/// Document-store implementation of `BlogRepository`
pub struct DocBlogRepository {
    client: Arc<DocStoreClient>,
}

impl DocBlogRepository {
    /// Create a new repository instance
    pub fn new(client: Arc<DocStoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlogRepository for DocBlogRepository {
    async fn list(&self) -> Result<Vec<BlogPost>> {
        self.client
            .query(COLLECTION, &DocQuery::new().order_by("createdAt", SortOrder::Desc))
            .await
    }

    async fn get(&self, id: &str) -> Result<Option<BlogPost>> {
        self.client.get_doc(COLLECTION, id).await
    }

    async fn create(&self, post: BlogPost) -> Result<BlogPost> {
        self.client.create_doc(COLLECTION, &post).await
    }

    async fn update(&self, post: BlogPost) -> Result<()> {
        self.client.patch_doc(COLLECTION, &post.id, &post).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_doc(COLLECTION, id).await
    }

    async fn set_status(&self, id: &str, status: BlogStatus) -> Result<()> {
        self.client.patch_doc(COLLECTION, id, &json!({ "status": status })).await
    }
}
