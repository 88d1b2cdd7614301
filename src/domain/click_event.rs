//! Click event message for asynchronous click tracking.

use chrono::{DateTime, Utc};

use crate::domain::entities::NewClick;

/// In-memory click fact passed from the redirect handler to the background
/// worker via a bounded channel.
///
/// The redirect response never waits for the click write: the handler does
/// a non-blocking `try_send` and drops the event when the queue is full.
/// Reaching the destination outranks analytics completeness.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub click_id: String,
    pub campaign_id: String,
    pub creator_id: Option<String>,
    pub ts: DateTime<Utc>,
    pub user_agent: Option<String>,
}

impl ClickEvent {
    pub fn new(
        click_id: String,
        campaign_id: String,
        creator_id: Option<String>,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            click_id,
            campaign_id,
            creator_id,
            ts: Utc::now(),
            user_agent: user_agent.map(str::to_string),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(ev: ClickEvent) -> Self {
        NewClick {
            click_id: ev.click_id,
            campaign_id: ev.campaign_id,
            creator_id: ev.creator_id,
            ts: ev.ts,
            user_agent: ev.user_agent,
        }
    }
}
