//! Daily metric row and its derived ratios.

use chrono::NaiveDate;
use serde::Serialize;

/// Rounds to two decimal places, the precision stored for ratios and revenue.
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Raw counters accumulated for one (campaign, creator) bucket in one day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricCounters {
    pub page_views: i64,
    pub add_to_cart: i64,
    pub begin_checkout: i64,
    pub purchases: i64,
    pub revenue: f64,
}

/// Ratios derived from a bucket's own counters.
///
/// Pure functions of [`MetricCounters`]: a metric row never needs its source
/// events re-read to validate consistency. All values rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRatios {
    pub cvr: f64,
    pub abandon_rate: f64,
    pub aov: f64,
    pub engagement_rate: f64,
    pub checkout_completion_rate: f64,
}

impl MetricCounters {
    /// Conversion base: begin_checkout when present, otherwise add_to_cart.
    fn cvr_base(&self) -> i64 {
        if self.begin_checkout > 0 {
            self.begin_checkout
        } else {
            self.add_to_cart
        }
    }

    pub fn ratios(&self) -> MetricRatios {
        let ratio = |num: f64, den: i64| if den > 0 { round2(num / den as f64) } else { 0.0 };

        MetricRatios {
            cvr: ratio(self.purchases as f64, self.cvr_base()),
            abandon_rate: if self.add_to_cart > 0 {
                round2(1.0 - self.purchases as f64 / self.add_to_cart as f64)
            } else {
                0.0
            },
            aov: ratio(self.revenue, self.purchases),
            engagement_rate: ratio(self.add_to_cart as f64, self.page_views),
            checkout_completion_rate: ratio(self.purchases as f64, self.begin_checkout),
        }
    }
}

/// One derived metric row: exactly one per (campaign, creator-or-absent, day).
///
/// Mutable by replacement only: re-aggregating a day replaces the row
/// wholesale rather than accumulating into it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetricRow {
    pub campaign_ref: i64,
    pub creator_ref: Option<i64>,
    pub date: NaiveDate,
    pub counters: MetricCounters,
    pub ratios: MetricRatios,
}

/// A stored metric row as served to dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub page_views: i64,
    pub add_to_cart: i64,
    pub begin_checkout: i64,
    pub purchases: i64,
    pub revenue: f64,
    pub cvr: f64,
    pub abandon_rate: f64,
    pub aov: f64,
    pub engagement_rate: f64,
    pub checkout_completion_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_day_ratios() {
        // 100 page views, 40 carts, 20 checkouts, 10 purchases, 500.00 revenue.
        let counters = MetricCounters {
            page_views: 100,
            add_to_cart: 40,
            begin_checkout: 20,
            purchases: 10,
            revenue: 500.0,
        };
        let r = counters.ratios();

        assert_eq!(r.cvr, 0.50);
        assert_eq!(r.abandon_rate, 0.75);
        assert_eq!(r.aov, 50.00);
        assert_eq!(r.engagement_rate, 0.40);
        assert_eq!(r.checkout_completion_rate, 0.50);
    }

    #[test]
    fn test_cvr_falls_back_to_add_to_cart() {
        let counters = MetricCounters {
            page_views: 10,
            add_to_cart: 4,
            begin_checkout: 0,
            purchases: 1,
            revenue: 25.0,
        };
        assert_eq!(counters.ratios().cvr, 0.25);
    }

    #[test]
    fn test_empty_bucket_yields_zero_ratios() {
        let r = MetricCounters::default().ratios();
        assert_eq!(r.cvr, 0.0);
        assert_eq!(r.abandon_rate, 0.0);
        assert_eq!(r.aov, 0.0);
        assert_eq!(r.engagement_rate, 0.0);
        assert_eq!(r.checkout_completion_rate, 0.0);
    }

    #[test]
    fn test_ratios_are_rounded_to_two_decimals() {
        let counters = MetricCounters {
            page_views: 3,
            add_to_cart: 1,
            begin_checkout: 3,
            purchases: 1,
            revenue: 10.0,
        };
        let r = counters.ratios();
        assert_eq!(r.cvr, 0.33);
        assert_eq!(r.engagement_rate, 0.33);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005), 1.0); // f64 repr of 1.005 is just below
        assert_eq!(round2(499.999), 500.0);
        assert_eq!(round2(0.125), 0.13);
    }
}
