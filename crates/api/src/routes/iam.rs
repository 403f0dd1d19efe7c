//! IAM handlers: the pending request queue and the user roster

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use hubgate_core::content::filter::roster_matches;
use hubgate_core::{ProfileRepository as _, RegistrationRepository as _};
use hubgate_domain::{HubgateError, Profile, RegistrationRequest, Role};
use serde::{Deserialize, Serialize};

use super::{require, STAFF};
use crate::context::AppContext;
use crate::error::ApiError;

/// A pending request as shown to administrators.
///
/// The caller-supplied credential stays server-side; it is needed only by
/// the approval step and never crosses this boundary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub organization: String,
    pub requested_role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,
}

impl From<RegistrationRequest> for RequestView {
    fn from(request: RegistrationRequest) -> Self {
        Self {
            id: request.id,
            full_name: request.full_name,
            email: request.email,
            organization: request.organization,
            requested_role: request.requested_role,
            requested_at: request.requested_at,
        }
    }
}

/// List the pending registration queue.
pub async fn list_requests(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<RequestView>>, ApiError> {
    require(&ctx, STAFF)?;

    let pending = ctx.requests.list_pending().await?;
    Ok(Json(pending.into_iter().map(RequestView::from).collect()))
}

#[derive(Deserialize)]
pub struct ApproveBody {
    /// Step-up credential: the approver re-confirms their own password
    /// immediately before the transition.
    pub password: String,
}

/// Approve a pending request, creating the identity and profile.
pub async fn approve_request(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<ApproveBody>,
) -> Result<Json<Profile>, ApiError> {
    let approver = require(&ctx, STAFF)?;

    let request = ctx
        .requests
        .get(&id)
        .await?
        .ok_or_else(|| HubgateError::NotFound(format!("registration request: {id}")))?;

    let profile = ctx.approval.approve(&request, &approver.email, &body.password).await?;
    Ok(Json(profile))
}

/// Decline a pending request. Irreversible; the SPA confirms first.
pub async fn reject_request(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&ctx, STAFF)?;

    ctx.approval.reject(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct RosterParams {
    #[serde(default)]
    pub search: String,
}

/// List the system roster, optionally filtered by a search term.
pub async fn list_users(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<RosterParams>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    require(&ctx, STAFF)?;

    let roster = ctx.profiles.list().await?;
    let filtered =
        roster.into_iter().filter(|p| roster_matches(p, &params.search)).collect();
    Ok(Json(filtered))
}

#[derive(Deserialize)]
pub struct StatusBody {
    pub active: bool,
}

/// Activate or suspend a profile.
pub async fn set_user_status(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<StatusCode, ApiError> {
    require(&ctx, STAFF)?;

    ctx.profiles.set_active(&id, body.active).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Purge a profile, permanently revoking system access.
pub async fn purge_user(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&ctx, STAFF)?;

    ctx.profiles.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
