//! Image asset upload handler

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use hubgate_core::ObjectStorage as _;
use hubgate_domain::HubgateError;
use serde_json::json;
use uuid::Uuid;

use super::require;
use crate::context::AppContext;
use crate::error::ApiError;

/// Storage namespaces the portal writes into
const ALLOWED_KINDS: &[&str] = &["partners", "service_assets", "blog_assets"];

/// Upload raw image bytes, returning the public URL to embed.
///
/// The stored path is prefixed with a fresh UUID so repeated uploads of
/// the same filename never collide.
pub async fn upload(
    State(ctx): State<Arc<AppContext>>,
    Path((kind, filename)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    require(&ctx, &[])?;

    if !ALLOWED_KINDS.contains(&kind.as_str()) {
        return Err(HubgateError::InvalidInput(format!("unknown asset kind: {kind}")).into());
    }
    if body.is_empty() {
        return Err(HubgateError::InvalidInput("empty upload".into()).into());
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let path = format!("{kind}/{}_{filename}", Uuid::new_v4());
    let url = ctx.storage.upload(&path, body.to_vec(), content_type).await?;

    Ok((StatusCode::CREATED, Json(json!({ "url": url }))))
}
