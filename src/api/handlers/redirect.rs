//! Handler for short-link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination with tracking parameters.
///
/// # Endpoint
///
/// `GET /c/{code}`
///
/// # Request Flow
///
/// 1. Resolve the code (persisted link first, stateless token second;
///    resolution itself is cached)
/// 2. Mint a fresh click id for this request
/// 3. Send a click event to the background worker (fire-and-forget)
/// 4. Return `302 Found` to the destination with `ci`/`cr`/`ck` appended
///
/// # Click Tracking
///
/// Click events go through a bounded channel; when the queue is full the
/// click is dropped rather than delaying the shopper.
///
/// # Errors
///
/// - `400 missing_code` - empty code segment
/// - `404 not_found` - unresolvable code or campaign
/// - `400 campaign_not_configured` - campaign without a shop domain
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::bad_request(
            "missing_code",
            "Short code is required",
            json!({}),
        ));
    }

    let redirect = state.redirect_service.resolve(code).await?;

    let click_event = ClickEvent::new(
        redirect.click_id.clone(),
        redirect.campaign_id.clone(),
        redirect.creator_id.clone(),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );
    if state.click_tx.try_send(click_event).is_err() {
        metrics::counter!("clicks_dropped_total").increment(1);
        tracing::warn!(click_id = %redirect.click_id, "click queue full, dropping click");
    }

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, redirect.location)],
    )
        .into_response())
}
