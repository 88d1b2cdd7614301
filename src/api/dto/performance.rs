//! DTOs for performance and order-report endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CouponOrderCount, DailyPoint};

/// Query parameters for the performance series.
#[derive(Debug, Deserialize)]
pub struct PerformanceQuery {
    /// Narrow the series to one creator; absent selects the unattributed
    /// bucket.
    pub creator_id: Option<String>,
}

/// Daily metric series for dashboards.
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub ok: bool,
    pub series: Vec<DailyPoint>,
}

/// Orders-per-coupon correlation report.
#[derive(Debug, Serialize)]
pub struct OrdersReportResponse {
    pub ok: bool,
    pub coupons: Vec<CouponOrderCount>,
}

/// Query parameters for the aggregation cron endpoint.
#[derive(Debug, Deserialize)]
pub struct AggregateQuery {
    /// Day to (re-)aggregate, `YYYY-MM-DD`. Defaults to the current UTC day.
    pub day: Option<NaiveDate>,
}
