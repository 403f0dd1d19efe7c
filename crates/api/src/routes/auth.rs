//! Session and registration handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hubgate_core::{IdentityProvider as _, ProfileRepository as _, RegistrationRepository as _};
use hubgate_domain::{HubgateError, Profile, RegistrationRequest, Role, Session};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::MEMBER_HOME_VIEW;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub profile: Profile,
    /// Role-determined landing view
    pub redirect: &'static str,
}

/// Sign in: verify the credential, join the profile by lower-cased email,
/// enforce the active flag, and push the fresh values into the session.
pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let principal = ctx.identity.authenticate(&body.email, &body.password).await?;
    let profile = ctx.profiles.find_by_email(&body.email.to_lowercase()).await?;

    let Some(profile) = profile else {
        // Authenticated but never provisioned; do not leave the hosted
        // session dangling.
        let _ = ctx.identity.sign_out().await;
        return Err(HubgateError::Auth("no access record exists for this account".into()).into());
    };

    if !profile.active {
        let _ = ctx.identity.sign_out().await;
        return Err(ApiError::Forbidden {
            message: "this account is currently inactive or pending approval".to_string(),
            redirect: None,
        });
    }

    // The values are fresh from the lookup above; pushing them directly
    // avoids a redundant round trip through the notification stream.
    ctx.session.set_authenticated(principal, profile.clone());
    info!(email = %profile.email, role = %profile.role, "operator signed in");

    let redirect = if profile.role.is_privileged() { "/" } else { MEMBER_HOME_VIEW };
    Ok(Json(LoginResponse { profile, redirect }))
}

/// Sign out; the notification stream clears the session state.
pub async fn logout(State(ctx): State<Arc<AppContext>>) -> Result<StatusCode, ApiError> {
    ctx.identity.sign_out().await?;
    Ok(StatusCode::NO_CONTENT)
}

fn default_requested_role() -> Role {
    Role::Member
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub full_name: String,
    pub email: String,
    pub organization: String,
    #[serde(default = "default_requested_role")]
    pub requested_role: Role,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub status: &'static str,
}

/// Submit a registration request. Unauthenticated by design; the request
/// waits in the pending queue until an administrator resolves it.
pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(HubgateError::InvalidInput("email and password are required".into()).into());
    }

    let stored = ctx
        .requests
        .create(RegistrationRequest::pending(
            body.full_name,
            body.email,
            body.organization,
            body.requested_role,
            body.password,
        ))
        .await?;

    info!(request_id = %stored.id, "registration request submitted");
    // Never echo the pending credential back to the caller.
    Ok((StatusCode::CREATED, Json(RegisterResponse { id: stored.id, status: "pending" })))
}

/// Current session snapshot, for the SPA shell to hydrate from.
pub async fn session(State(ctx): State<Arc<AppContext>>) -> Json<Session> {
    Json(ctx.session.session())
}
