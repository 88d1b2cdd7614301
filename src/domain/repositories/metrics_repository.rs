//! Repository trait for daily metric rows.

use crate::domain::entities::{DailyMetricRow, DailyPoint};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for derived daily metrics.
///
/// Rows are keyed by `(campaign_ref, creator_ref-or-absent, date)` and
/// written as full replacements: re-running aggregation for a day must
/// leave identical rows, never accumulate into existing ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Full-replace upsert of one bucket's row.
    async fn replace(&self, row: DailyMetricRow) -> Result<(), AppError>;

    /// Daily series for a campaign, optionally narrowed to one creator.
    /// `creator_ref = None` selects the unattributed bucket rows.
    async fn series(
        &self,
        campaign_ref: i64,
        creator_ref: Option<i64>,
    ) -> Result<Vec<DailyPoint>, AppError>;
}
