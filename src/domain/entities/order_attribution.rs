//! Order-attribution fact recorded from storefront webhooks.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Raw fact linking an order to the discount codes used on it.
///
/// Recorded as-is from verified order-creation payloads; correlation to a
/// campaign happens later by matching `codes` against provisioned coupon
/// codes. Duplicate webhook deliveries may duplicate facts (documented
/// limitation; plain create semantics).
#[derive(Debug, Clone)]
pub struct OrderAttribution {
    #[allow(dead_code)]
    pub id: i64,
    pub order_id: String,
    pub codes: Vec<String>,
    pub shop: String,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new order-attribution fact.
#[derive(Debug, Clone)]
pub struct NewOrderAttribution {
    pub order_id: String,
    pub codes: Vec<String>,
    pub shop: String,
}

/// Per-coupon order counts for a campaign's correlation report.
#[derive(Debug, Clone, Serialize)]
pub struct CouponOrderCount {
    pub coupon_code: String,
    pub orders: i64,
}
