//! Inbound message handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hubgate_core::content::filter::filter_messages;
use hubgate_core::content::reply::{render_reply, RenderedReply};
use hubgate_core::MessageRepository as _;
use hubgate_domain::{ContactMessage, HubgateError, SortOrder};
use serde::Deserialize;

use super::{require, STAFF};
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub sort: Option<SortOrder>,
    #[serde(default)]
    pub search: String,
    /// Comma-separated any-of service filter
    #[serde(default)]
    pub services: String,
}

/// List inbound messages, filtered and ordered.
pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    require(&ctx, STAFF)?;

    let messages = ctx.messages.list(params.sort.unwrap_or_default()).await?;
    let services: Vec<String> = params
        .services
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let filtered =
        filter_messages(&messages, &params.search, &services).into_iter().cloned().collect();
    Ok(Json(filtered))
}

/// Delete a handled message.
pub async fn remove(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&ctx, STAFF)?;

    ctx.messages.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Render the reply template for one message as a `mailto:` URL.
pub async fn reply(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<RenderedReply>, ApiError> {
    require(&ctx, STAFF)?;

    let messages = ctx.messages.list(SortOrder::Desc).await?;
    let message = messages
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| HubgateError::NotFound(format!("message: {id}")))?;

    Ok(Json(render_reply(&ctx.config.reply, message)))
}
