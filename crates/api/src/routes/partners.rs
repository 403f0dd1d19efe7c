//! Partner directory handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hubgate_core::PartnerRepository as _;
use hubgate_domain::{HubgateError, Partner, PartnerFeature};
use serde::Deserialize;

use super::{require, STAFF};
use crate::context::AppContext;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct PartnerBody {
    pub name: String,
    pub sub: String,
    pub desc: String,
    pub link: String,
    pub theme: String,
    #[serde(default)]
    pub features: Vec<PartnerFeature>,
    /// Public URL from a prior asset upload
    #[serde(default)]
    pub image: String,
}

impl PartnerBody {
    fn into_partner(self, id: String) -> Partner {
        Partner {
            id,
            name: self.name,
            sub: self.sub,
            desc: self.desc,
            link: self.link,
            theme: self.theme,
            features: self.features,
            image: self.image,
            created_at: None,
            updated_at: None,
        }
    }
}

/// List the curated directory.
pub async fn list(State(ctx): State<Arc<AppContext>>) -> Result<Json<Vec<Partner>>, ApiError> {
    require(&ctx, STAFF)?;
    Ok(Json(ctx.partners.list().await?))
}

/// Add a partner entry.
pub async fn create(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<PartnerBody>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    require(&ctx, STAFF)?;

    let stored = ctx.partners.create(body.into_partner(String::new())).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Update an existing partner entry.
pub async fn update(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<PartnerBody>,
) -> Result<StatusCode, ApiError> {
    require(&ctx, STAFF)?;

    if ctx.partners.get(&id).await?.is_none() {
        return Err(HubgateError::NotFound(format!("partner: {id}")).into());
    }

    ctx.partners.update(body.into_partner(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a partner entry.
pub async fn remove(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&ctx, STAFF)?;

    ctx.partners.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
