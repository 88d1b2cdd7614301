//! Handler for the tracking ingest endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::track::{TrackBatch, TrackResponse};
use crate::domain::entities::NewTrackingEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Ingests a batch of client tracking events.
///
/// # Endpoint
///
/// `POST /track`
///
/// # Request Body
///
/// ```json
/// {
///   "events": [
///     {
///       "event": "purchase",
///       "ts": 1710500000000,
///       "sessionId": "f3a9c2e1",
///       "clickId": "b6e2...",
///       "payload": { "orderId": "5551212", "value": 49.90 }
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Malformed JSON and failed validation both return `400` with
/// `{"ok": false, "error": "invalid"}`; the batch is rejected wholesale.
pub async fn track_handler(
    State(state): State<AppState>,
    payload: Result<Json<TrackBatch>, JsonRejection>,
) -> Result<Json<TrackResponse>, AppError> {
    let Json(batch) = payload.map_err(|rejection| {
        AppError::bad_request(
            "invalid",
            "Malformed request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    batch.validate()?;

    let events = batch
        .events
        .into_iter()
        .map(NewTrackingEvent::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let summary = state.tracking_service.ingest(events).await?;

    Ok(Json(TrackResponse {
        ok: true,
        accepted: summary.accepted,
        deduplicated: summary.deduplicated,
    }))
}
