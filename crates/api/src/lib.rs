//! # Hubgate App
//!
//! The application shell: an axum HTTP server exposing the admin portal
//! operations over the core services and infra adapters. Every protected
//! route evaluates the role gate against the process-local session before
//! its handler runs.

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use context::AppContext;

/// Build the application router over a fully wired context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Session & registration
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/session", get(routes::auth::session))
        // IAM: pending requests and the roster
        .route("/iam/requests", get(routes::iam::list_requests))
        .route("/iam/requests/{id}/approve", post(routes::iam::approve_request))
        .route("/iam/requests/{id}/reject", post(routes::iam::reject_request))
        .route("/iam/users", get(routes::iam::list_users))
        .route("/iam/users/{id}/status", post(routes::iam::set_user_status))
        .route("/iam/users/{id}", delete(routes::iam::purge_user))
        // Inbound messages
        .route("/messages", get(routes::messages::list))
        .route("/messages/{id}", delete(routes::messages::remove))
        .route("/messages/{id}/reply", post(routes::messages::reply))
        // Partner directory
        .route("/partners", get(routes::partners::list).post(routes::partners::create))
        .route("/partners/{id}", put(routes::partners::update).delete(routes::partners::remove))
        // Member self-service listings
        .route("/listings/mine", get(routes::listings::mine))
        .route("/listings", post(routes::listings::submit))
        .route("/listings/{id}", put(routes::listings::update))
        // Blog posts
        .route("/blogs", get(routes::blogs::list).post(routes::blogs::create))
        .route("/blogs/{id}", put(routes::blogs::update).delete(routes::blogs::remove))
        .route("/blogs/{id}/status", post(routes::blogs::toggle_status))
        // Image assets
        .route("/assets/{kind}/{filename}", post(routes::assets::upload))
        .layer(axum::middleware::from_fn(utils::logging::log_requests))
        .with_state(ctx)
}
