//! Blog post handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hubgate_core::content::filter::{parse_tags, partition_blogs};
use hubgate_core::BlogRepository as _;
use hubgate_domain::{BlogPost, BlogStatus, HubgateError, Profile};
use serde::Deserialize;
use serde_json::json;

use super::{require, STAFF};
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ListParams {
    /// "live" (default) or "archived"
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub search: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogBody {
    pub title: String,
    pub excerpt: String,
    /// Rendered HTML from the editor
    pub content: String,
    pub category: String,
    /// Comma-separated tag list, as typed in the form
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub featured_image: String,
}

impl BlogBody {
    fn into_post(
        self,
        id: String,
        author: &Profile,
        status: BlogStatus,
        views: i64,
    ) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            tags: parse_tags(&self.tags),
            featured_image: self.featured_image,
            author_name: author.full_name.clone(),
            author_email: author.email.clone(),
            author_avatar: String::new(),
            status,
            views,
            created_at: None,
            updated_at: None,
        }
    }
}

/// List posts for the live or archived view, with search.
pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    require(&ctx, STAFF)?;

    let status =
        if params.view == "archived" { BlogStatus::Archived } else { BlogStatus::Active };

    let posts = ctx.blogs.list().await?;
    let selected =
        partition_blogs(&posts, status, &params.search).into_iter().cloned().collect();
    Ok(Json(selected))
}

/// Publish a new post.
pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<BlogBody>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let author = require(&ctx, STAFF)?;

    let post = body.into_post(String::new(), &author, BlogStatus::Active, 0);
    let stored = ctx.blogs.create(post).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Edit a post, preserving its status, view counter, and creation time.
pub async fn update(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<BlogBody>,
) -> Result<StatusCode, ApiError> {
    let author = require(&ctx, STAFF)?;

    let existing = ctx
        .blogs
        .get(&id)
        .await?
        .ok_or_else(|| HubgateError::NotFound(format!("blog post: {id}")))?;

    let mut updated = body.into_post(id, &author, existing.status, existing.views);
    updated.created_at = existing.created_at;
    ctx.blogs.update(updated).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a post between live and archived.
pub async fn toggle_status(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require(&ctx, STAFF)?;

    let existing = ctx
        .blogs
        .get(&id)
        .await?
        .ok_or_else(|| HubgateError::NotFound(format!("blog post: {id}")))?;

    let next = existing.status.toggled();
    ctx.blogs.set_status(&id, next).await?;
    Ok(Json(json!({ "status": next })))
}

/// Delete a post.
pub async fn remove(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&ctx, STAFF)?;

    ctx.blogs.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
