//! Structured request logging helpers

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use hubgate_domain::HubgateError;
use tracing::{info, warn};

/// Log the outcome of every request with structured fields.
///
/// Success and failure use distinct events so log pipelines can split on
/// the event name alone. Paths carry no sensitive values; credentials
/// travel in bodies, which are never logged.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(%method, path, status, duration_ms, "request_failure");
    } else {
        info!(%method, path, status, duration_ms, "request_success");
    }

    response
}

/// Convert a `HubgateError` into a stable label suitable for
/// metrics/logging and the error envelope.
#[inline]
#[must_use]
pub fn error_label(error: &HubgateError) -> &'static str {
    match error {
        HubgateError::Backend(_) => "backend",
        HubgateError::Config(_) => "config",
        HubgateError::Network(_) => "network",
        HubgateError::Auth(_) => "auth",
        HubgateError::Forbidden(_) => "forbidden",
        HubgateError::NotFound(_) => "not_found",
        HubgateError::InvalidInput(_) => "invalid_input",
        HubgateError::Internal(_) => "internal",
    }
}
