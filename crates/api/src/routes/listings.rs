//! Member self-service listing handlers
//!
//! Open to any provisioned, active profile — this is the screen Members
//! land on. Submissions are stamped with the submitter's identity from
//! the session profile, and every edit drops the listing back to pending
//! review.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hubgate_core::ListingRepository as _;
use hubgate_domain::{ListingStatus, PartnerFeature, Profile, ServiceListing};
use serde::Deserialize;

use super::require;
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ListingBody {
    pub name: String,
    pub sub: String,
    pub desc: String,
    pub link: String,
    pub theme: String,
    #[serde(default)]
    pub features: Vec<PartnerFeature>,
    #[serde(default)]
    pub image: String,
}

impl ListingBody {
    fn into_listing(self, id: String, submitter: &Profile) -> ServiceListing {
        ServiceListing {
            id,
            name: self.name,
            sub: self.sub,
            desc: self.desc,
            link: self.link,
            theme: self.theme,
            features: self.features,
            image: self.image,
            organization: submitter.organization.clone(),
            submitted_by: submitter.email.clone(),
            submitter_name: submitter.full_name.clone(),
            status: ListingStatus::Pending,
            created_at: None,
            updated_at: None,
        }
    }
}

/// The caller's own listings.
pub async fn mine(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<ServiceListing>>, ApiError> {
    let profile = require(&ctx, &[])?;
    Ok(Json(ctx.listings.list_by_submitter(&profile.email).await?))
}

/// Submit a new listing for review.
pub async fn submit(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ListingBody>,
) -> Result<(StatusCode, Json<ServiceListing>), ApiError> {
    let profile = require(&ctx, &[])?;

    let stored = ctx.listings.create(body.into_listing(String::new(), &profile)).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Edit a listing; the edit resets it to pending review.
pub async fn update(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<ListingBody>,
) -> Result<StatusCode, ApiError> {
    let profile = require(&ctx, &[])?;

    ctx.listings.update(body.into_listing(id, &profile)).await?;
    Ok(StatusCode::NO_CONTENT)
}
