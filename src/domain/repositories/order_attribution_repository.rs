//! Repository trait for order-attribution facts.

use crate::domain::entities::{CouponOrderCount, NewOrderAttribution};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for raw order-attribution facts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderAttributionRepository: Send + Sync {
    /// Records a fact. Plain create: duplicate webhook deliveries may
    /// produce duplicate facts.
    async fn record(&self, fact: NewOrderAttribution) -> Result<(), AppError>;

    /// Counts recorded orders per coupon code, restricted to the given
    /// codes. Codes with no matching orders are omitted.
    async fn count_orders_by_codes(
        &self,
        codes: &[String],
    ) -> Result<Vec<CouponOrderCount>, AppError>;
}
