//! Campaign ↔ creator link entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Join entity binding one campaign to one creator.
///
/// Carries the attribution signals for the pair: an optional persisted
/// short code, a provisioned coupon code, a landing URL override, and a
/// utm_content marker. Exactly one link exists per (campaign, creator).
#[derive(Debug, Clone, Serialize)]
pub struct CreatorLink {
    #[serde(skip)]
    pub id: i64,
    pub campaign_id: String,
    pub creator_id: String,
    pub short_code: Option<String>,
    pub coupon_code: Option<String>,
    pub landing_url: Option<String>,
    pub utm_content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a campaign/creator link.
#[derive(Debug, Clone)]
pub struct NewCreatorLink {
    pub campaign_id: String,
    pub creator_id: String,
    pub short_code: Option<String>,
    pub landing_url: Option<String>,
    pub utm_content: Option<String>,
}

/// Campaign/creator pair resolved from an attribution signal lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAttribution {
    pub campaign_id: String,
    pub creator_id: Option<String>,
}
