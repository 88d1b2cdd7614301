//! Click entity: one resolved redirect.

use chrono::{DateTime, Utc};

/// An immutable click fact recorded when a short link redirects.
///
/// `click_id` is globally unique and generated server-side; it travels to
/// the storefront as the `ck` query parameter and comes back on tracking
/// events, where it is the second-highest-priority attribution signal.
#[derive(Debug, Clone)]
pub struct Click {
    #[allow(dead_code)]
    pub id: i64,
    pub click_id: String,
    pub campaign_id: String,
    pub creator_id: Option<String>,
    pub ts: DateTime<Utc>,
    pub user_agent: Option<String>,
}

/// Input data for recording a new click fact.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub click_id: String,
    pub campaign_id: String,
    pub creator_id: Option<String>,
    pub ts: DateTime<Utc>,
    pub user_agent: Option<String>,
}
