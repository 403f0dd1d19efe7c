//! HTTP route handlers
//!
//! Every protected handler calls [`require`] first: the role gate is
//! evaluated against the current session and its decision is mapped onto
//! the HTTP envelope before any handler logic runs.

pub mod assets;
pub mod auth;
pub mod blogs;
pub mod iam;
pub mod listings;
pub mod messages;
pub mod partners;

use hubgate_core::{evaluate, GateDecision, Redirect};
use hubgate_domain::{Profile, Role};

use crate::context::AppContext;
use crate::error::ApiError;

/// The internal staff allow-set. Exact membership, no hierarchy.
pub(crate) const STAFF: &[Role] = &[Role::Admin, Role::Lead];

/// The sign-in view of the SPA
pub(crate) const SIGN_IN_VIEW: &str = "/login";

/// The member self-service landing view
pub(crate) const MEMBER_HOME_VIEW: &str = "/submit-details";

const fn redirect_path(redirect: Redirect) -> &'static str {
    match redirect {
        Redirect::SignIn => SIGN_IN_VIEW,
        Redirect::MemberHome => MEMBER_HOME_VIEW,
    }
}

/// Gate a request: allow it through with the acting profile, or map the
/// denial onto the HTTP envelope.
pub(crate) fn require(ctx: &AppContext, required: &[Role]) -> Result<Profile, ApiError> {
    let session = ctx.session.session();

    match evaluate(&session, required) {
        GateDecision::Allow => session
            .profile
            .ok_or(ApiError::Unauthenticated { redirect: SIGN_IN_VIEW }),
        GateDecision::Pending => Err(ApiError::Pending),
        GateDecision::DenyUnauthenticated { redirect } => {
            Err(ApiError::Unauthenticated { redirect: redirect_path(redirect) })
        }
        GateDecision::DenySuspended => Err(ApiError::Forbidden {
            message: "access to this account has been revoked".to_string(),
            redirect: None,
        }),
        GateDecision::DenyWrongRole { redirect } => Err(ApiError::Forbidden {
            message: "this view requires a different role".to_string(),
            redirect: Some(redirect_path(redirect)),
        }),
    }
}
