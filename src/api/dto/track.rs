//! DTOs for the tracking ingest endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use validator::Validate;

use crate::domain::entities::NewTrackingEvent;
use crate::error::AppError;

/// Batch of client-side tracking events.
///
/// The storefront SDK flushes events in batches; an empty batch is a client
/// bug and is rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct TrackBatch {
    #[validate(length(min = 1, message = "Batch must contain at least one event"))]
    #[validate(nested)]
    pub events: Vec<TrackEvent>,
}

/// One client-side tracking event as sent over the wire (camelCase keys).
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
    /// Event name, e.g. `page_view`, `add_to_cart`, `purchase`.
    #[validate(length(min = 1, message = "Event name must not be empty"))]
    pub event: String,

    /// Client timestamp in epoch milliseconds.
    #[validate(range(min = 1, message = "Timestamp must be a positive integer"))]
    pub ts: i64,

    /// Anonymous session identifier minted by the SDK.
    #[validate(length(min = 8, message = "sessionId must be at least 8 characters"))]
    pub session_id: String,

    pub campaign_id: Option<String>,
    pub creator_id: Option<String>,
    pub click_id: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    /// Referring page, sent by the SDK under the wire name `ref`.
    #[serde(rename = "ref")]
    pub referer: Option<String>,

    #[serde(default)]
    pub utm: Map<String, Value>,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

impl TryFrom<TrackEvent> for NewTrackingEvent {
    type Error = AppError;

    fn try_from(dto: TrackEvent) -> Result<Self, Self::Error> {
        let ts = DateTime::<Utc>::from_timestamp_millis(dto.ts).ok_or_else(|| {
            AppError::bad_request(
                "invalid",
                "Timestamp out of range",
                json!({ "ts": dto.ts }),
            )
        })?;

        Ok(NewTrackingEvent {
            event: dto.event,
            ts,
            session_id: dto.session_id,
            campaign_id: dto.campaign_id,
            creator_id: dto.creator_id,
            click_id: dto.click_id,
            source: dto.source,
            url: dto.url,
            referer: dto.referer,
            utm: dto.utm,
            payload: dto.payload,
        })
    }
}

/// Ingest acknowledgement.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub ok: bool,
    pub accepted: usize,
    pub deduplicated: usize,
}
