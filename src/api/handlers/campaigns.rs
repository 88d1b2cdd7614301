//! Handlers for campaign management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::campaign::{
    ConnectShopRequest, CreateCampaignRequest, UpdateCampaignRequest,
};
use crate::api::dto::performance::{OrdersReportResponse, PerformanceQuery, PerformanceResponse};
use crate::domain::entities::Campaign;
use crate::error::AppError;
use crate::state::AppState;

/// Lists enabled campaigns.
///
/// # Endpoint
///
/// `GET /api/campaigns`
pub async fn list_campaigns_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    Ok(Json(state.campaign_service.list_campaigns().await?))
}

/// Creates a campaign.
///
/// # Endpoint
///
/// `POST /api/campaigns`
///
/// # Errors
///
/// Returns `409 conflict` when the campaign id is taken.
pub async fn create_campaign_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCampaignRequest>,
) -> Result<Json<Campaign>, AppError> {
    payload.validate()?;
    let campaign = state.campaign_service.create_campaign(payload.into()).await?;
    Ok(Json(campaign))
}

/// Fetches one campaign by its business key.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}`
pub async fn get_campaign_handler(
    Path(campaign_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Campaign>, AppError> {
    Ok(Json(state.campaign_service.get_campaign(&campaign_id).await?))
}

/// Partially updates a campaign.
///
/// # Endpoint
///
/// `PATCH /api/campaigns/{id}`
pub async fn update_campaign_handler(
    Path(campaign_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, AppError> {
    payload.validate()?;
    // Cached resolutions for this campaign's codes age out via TTL.
    let campaign = state
        .campaign_service
        .update_campaign(&campaign_id, payload.into())
        .await?;
    Ok(Json(campaign))
}

/// Disables a campaign (soft delete).
///
/// # Endpoint
///
/// `DELETE /api/campaigns/{id}`
pub async fn disable_campaign_handler(
    Path(campaign_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Campaign>, AppError> {
    Ok(Json(
        state.campaign_service.disable_campaign(&campaign_id).await?,
    ))
}

/// Attaches a storefront domain to a campaign.
///
/// # Endpoint
///
/// `POST /api/campaigns/connect`
pub async fn connect_shop_handler(
    State(state): State<AppState>,
    Json(payload): Json<ConnectShopRequest>,
) -> Result<Json<Campaign>, AppError> {
    payload.validate()?;
    let campaign = state
        .campaign_service
        .connect_shop(&payload.campaign_id, &payload.shop)
        .await?;
    Ok(Json(campaign))
}

/// Daily metric series for one campaign.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}/performance?creator_id=...`
///
/// Without `creator_id` the unattributed bucket is returned.
pub async fn performance_handler(
    Path(campaign_id): Path<String>,
    Query(query): Query<PerformanceQuery>,
    State(state): State<AppState>,
) -> Result<Json<PerformanceResponse>, AppError> {
    let series = state
        .campaign_service
        .performance(&campaign_id, query.creator_id.as_deref())
        .await?;
    Ok(Json(PerformanceResponse { ok: true, series }))
}

/// Orders-per-coupon correlation report for one campaign.
///
/// # Endpoint
///
/// `GET /api/campaigns/{id}/orders`
pub async fn orders_report_handler(
    Path(campaign_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<OrdersReportResponse>, AppError> {
    let coupons = state.webhook_service.orders_report(&campaign_id).await?;
    Ok(Json(OrdersReportResponse { ok: true, coupons }))
}
