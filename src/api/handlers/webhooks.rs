//! Handler for storefront order webhooks.

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
    pub recorded: bool,
}

/// Ingests an order-creation webhook.
///
/// # Endpoint
///
/// `POST /webhooks/orders`
///
/// Signature verification happens at the edge before the request reaches
/// this service; the handler trusts the payload and records the order id
/// together with its discount codes. Orders without discount codes are
/// acknowledged with `recorded: false` so the sender never retries them.
///
/// # Errors
///
/// Returns `400 invalid` when the payload has no order id.
pub async fn orders_webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<WebhookResponse>, AppError> {
    let shop = headers
        .get("x-shopify-shop-domain")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let outcome = state.webhook_service.ingest_order(shop, &payload).await?;

    Ok(Json(WebhookResponse {
        ok: true,
        recorded: outcome.recorded,
    }))
}
