//! Creator entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An influencer/creator driving traffic to campaigns.
///
/// Creators are upserted on first reference: joining one to a campaign or
/// aggregating events that mention an unknown `creator_id` creates the row.
#[derive(Debug, Clone, Serialize)]
pub struct Creator {
    #[serde(skip)]
    pub id: i64,
    pub creator_id: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
