//! HTTP error envelope
//!
//! Every failure is rendered as a JSON envelope with a stable `error`
//! label, a human-readable message, and (for gate denials) the redirect
//! the SPA should follow. Nothing propagates as an unhandled fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hubgate_core::ApprovalError;
use hubgate_domain::HubgateError;
use serde::Serialize;
use tracing::error;

use crate::utils::logging::error_label;

/// Failure of an API request
#[derive(Debug)]
pub enum ApiError {
    /// Session still loading; the SPA should retry shortly
    Pending,
    /// No one is signed in (or the principal is unprovisioned)
    Unauthenticated { redirect: &'static str },
    /// Signed in but not allowed; `redirect` is absent for the terminal
    /// suspended notice
    Forbidden { message: String, redirect: Option<&'static str> },
    /// Domain-level failure from a service or repository
    Domain(HubgateError),
    /// Step-distinct approval workflow failure
    Approval(ApprovalError),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'a str>,
}

impl From<HubgateError> for ApiError {
    fn from(err: HubgateError) -> Self {
        Self::Domain(err)
    }
}

impl From<ApprovalError> for ApiError {
    fn from(err: ApprovalError) -> Self {
        Self::Approval(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label, message, redirect) = match self {
            Self::Pending => (
                StatusCode::SERVICE_UNAVAILABLE,
                "session_pending",
                "session is still loading".to_string(),
                None,
            ),
            Self::Unauthenticated { redirect } => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "sign in to continue".to_string(),
                Some(redirect),
            ),
            Self::Forbidden { message, redirect } => {
                (StatusCode::FORBIDDEN, "forbidden", message, redirect)
            }
            Self::Domain(err) => {
                let status = match &err {
                    HubgateError::Auth(_) => StatusCode::UNAUTHORIZED,
                    HubgateError::Forbidden(_) => StatusCode::FORBIDDEN,
                    HubgateError::NotFound(_) => StatusCode::NOT_FOUND,
                    HubgateError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    HubgateError::Network(_) => StatusCode::BAD_GATEWAY,
                    HubgateError::Backend(_) | HubgateError::Config(_) | HubgateError::Internal(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!(error = %err, "request failed");
                }
                (status, error_label(&err), err.to_string(), None)
            }
            Self::Approval(err) => {
                // Step-1 failures are user-actionable (duplicate email, weak
                // credential) and left no state behind; everything later is a
                // partial failure that must be surfaced loudly.
                let (status, label) = match &err {
                    ApprovalError::IdentityCreation { .. } => {
                        (StatusCode::BAD_REQUEST, "approval_rejected")
                    }
                    ApprovalError::ProfileWrite { .. } | ApprovalError::RequestCleanup { .. } => {
                        (StatusCode::BAD_GATEWAY, "approval_partial_failure")
                    }
                    ApprovalError::SessionRestore { .. } => {
                        (StatusCode::BAD_GATEWAY, "approval_session_restore_failed")
                    }
                };
                if status != StatusCode::BAD_REQUEST {
                    error!(error = %err, "approval workflow failure");
                }
                (status, label, err.to_string(), None)
            }
        };

        (status, Json(ErrorBody { error: label, message, redirect })).into_response()
    }
}
