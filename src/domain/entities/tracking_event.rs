//! Tracking event entity and event-kind classification.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Funnel position of a tracking event.
///
/// Unknown kinds are preserved as [`EventKind::Other`] and ignored by the
/// aggregator, so new client-side event names are forward-compatible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    PageView,
    AddToCart,
    BeginCheckout,
    Purchase,
    Other(String),
}

impl EventKind {
    pub fn parse(event: &str) -> Self {
        match event {
            "page_view" => Self::PageView,
            "add_to_cart" => Self::AddToCart,
            "begin_checkout" => Self::BeginCheckout,
            "purchase" => Self::Purchase,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PageView => "page_view",
            Self::AddToCart => "add_to_cart",
            Self::BeginCheckout => "begin_checkout",
            Self::Purchase => "purchase",
            Self::Other(s) => s,
        }
    }
}

/// An attributed tracking event ready for persistence.
///
/// Immutable once written. Purchase events with a `payload.orderId` derive
/// a dedup key `purchase-<orderId>` used for create-if-absent writes.
#[derive(Debug, Clone)]
pub struct NewTrackingEvent {
    pub event: String,
    pub ts: DateTime<Utc>,
    pub session_id: String,
    pub campaign_id: Option<String>,
    pub creator_id: Option<String>,
    pub click_id: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub referer: Option<String>,
    pub utm: Map<String, Value>,
    pub payload: Map<String, Value>,
}

impl NewTrackingEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.event)
    }

    /// Identity key for deduplicated writes.
    ///
    /// Only purchases with a string `payload.orderId` have one; all other
    /// events are plain appends and may duplicate on client retry.
    pub fn dedup_key(&self) -> Option<String> {
        if self.kind() != EventKind::Purchase {
            return None;
        }
        let order_id = self.payload.get("orderId")?.as_str()?.trim();
        if order_id.is_empty() {
            return None;
        }
        Some(format!("purchase-{order_id}"))
    }
}

/// Projection of a stored event used by the daily aggregator.
#[derive(Debug, Clone)]
pub struct DayEvent {
    pub event: String,
    pub campaign_id: Option<String>,
    pub creator_id: Option<String>,
    pub payload: Value,
}

impl DayEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.event)
    }

    /// Numeric `payload.value`, tolerating string-encoded numbers.
    /// Missing or unparseable values count as zero revenue.
    pub fn revenue(&self) -> f64 {
        match self.payload.get("value") {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn purchase(payload: Value) -> NewTrackingEvent {
        NewTrackingEvent {
            event: "purchase".to_string(),
            ts: Utc::now(),
            session_id: "session-1".to_string(),
            campaign_id: Some("cmp-1".to_string()),
            creator_id: None,
            click_id: None,
            source: None,
            url: None,
            referer: None,
            utm: Map::new(),
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_event_kind_parse() {
        assert_eq!(EventKind::parse("page_view"), EventKind::PageView);
        assert_eq!(EventKind::parse("purchase"), EventKind::Purchase);
        assert_eq!(
            EventKind::parse("newsletter_signup"),
            EventKind::Other("newsletter_signup".to_string())
        );
    }

    #[test]
    fn test_dedup_key_for_purchase() {
        let e = purchase(json!({ "orderId": " ord-99 " }));
        assert_eq!(e.dedup_key(), Some("purchase-ord-99".to_string()));
    }

    #[test]
    fn test_no_dedup_key_without_order_id() {
        assert_eq!(purchase(json!({})).dedup_key(), None);
        assert_eq!(purchase(json!({ "orderId": 42 })).dedup_key(), None);
        assert_eq!(purchase(json!({ "orderId": "  " })).dedup_key(), None);
    }

    #[test]
    fn test_no_dedup_key_for_other_kinds() {
        let mut e = purchase(json!({ "orderId": "ord-1" }));
        e.event = "add_to_cart".to_string();
        assert_eq!(e.dedup_key(), None);
    }

    #[test]
    fn test_day_event_revenue_parsing() {
        let mk = |payload: Value| DayEvent {
            event: "purchase".to_string(),
            campaign_id: None,
            creator_id: None,
            payload,
        };

        assert_eq!(mk(json!({ "value": 49.9 })).revenue(), 49.9);
        assert_eq!(mk(json!({ "value": "19.50" })).revenue(), 19.5);
        assert_eq!(mk(json!({ "value": "n/a" })).revenue(), 0.0);
        assert_eq!(mk(json!({})).revenue(), 0.0);
    }
}
