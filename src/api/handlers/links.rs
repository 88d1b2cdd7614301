//! Handlers for creator-link and coupon endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::links::{CouponRequest, JoinCreatorRequest, JoinCreatorResponse};
use crate::domain::entities::CreatorLink;
use crate::error::AppError;
use crate::state::AppState;

/// Joins a creator to a campaign.
///
/// # Endpoint
///
/// `POST /api/campaigns/{id}/creators`
///
/// Upserts the creator, settles the short code (custom or generated), and
/// returns the created link with both share paths.
///
/// # Errors
///
/// - `400 invalid_code` - custom code fails validation
/// - `404 not_found` - campaign does not exist
/// - `409 conflict` - pair already linked or short code taken
pub async fn join_creator_handler(
    Path(campaign_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<JoinCreatorRequest>,
) -> Result<Json<JoinCreatorResponse>, AppError> {
    payload.validate()?;
    let joined = state
        .campaign_service
        .join_creator(&campaign_id, payload.into())
        .await?;
    Ok(Json(joined.into()))
}

/// Lists a campaign's creator links.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}/creators`
pub async fn list_creators_handler(
    Path(campaign_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<CreatorLink>>, AppError> {
    Ok(Json(state.campaign_service.list_creators(&campaign_id).await?))
}

/// Records a provisioned coupon code on a campaign/creator link.
///
/// # Endpoint
///
/// `POST /api/coupons`
///
/// The discount itself is created on the commerce platform out of band;
/// this endpoint only wires the code into attribution.
pub async fn assign_coupon_handler(
    State(state): State<AppState>,
    Json(payload): Json<CouponRequest>,
) -> Result<Json<CreatorLink>, AppError> {
    payload.validate()?;
    let link = state
        .campaign_service
        .assign_coupon(
            &payload.campaign_id,
            &payload.creator_id,
            &payload.coupon_code,
        )
        .await?;
    Ok(Json(link))
}
