//! PostgreSQL implementation of the daily metrics repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{DailyMetricRow, DailyPoint};
use crate::domain::repositories::MetricsRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct DailyPointRow {
    date: NaiveDate,
    page_views: i64,
    add_to_cart: i64,
    begin_checkout: i64,
    purchases: i64,
    revenue: f64,
    cvr: f64,
    abandon_rate: f64,
    aov: f64,
    engagement_rate: f64,
    checkout_completion_rate: f64,
}

impl From<DailyPointRow> for DailyPoint {
    fn from(row: DailyPointRow) -> Self {
        DailyPoint {
            date: row.date,
            page_views: row.page_views,
            add_to_cart: row.add_to_cart,
            begin_checkout: row.begin_checkout,
            purchases: row.purchases,
            revenue: row.revenue,
            cvr: row.cvr,
            abandon_rate: row.abandon_rate,
            aov: row.aov,
            engagement_rate: row.engagement_rate,
            checkout_completion_rate: row.checkout_completion_rate,
        }
    }
}

/// PostgreSQL repository for derived daily metrics.
///
/// The unique index on `(campaign_ref, COALESCE(creator_ref, 0), date)`
/// backs the full-replace upsert: re-aggregating a day overwrites rather
/// than accumulates.
pub struct PgMetricsRepository {
    pool: Arc<PgPool>,
}

impl PgMetricsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PgMetricsRepository {
    async fn replace(&self, row: DailyMetricRow) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO daily_metrics
                (campaign_ref, creator_ref, date, page_views, add_to_cart,
                 begin_checkout, purchases, revenue, cvr, abandon_rate, aov,
                 engagement_rate, checkout_completion_rate, computed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, NOW())
            ON CONFLICT (campaign_ref, COALESCE(creator_ref, 0), date)
            DO UPDATE SET
                page_views = EXCLUDED.page_views,
                add_to_cart = EXCLUDED.add_to_cart,
                begin_checkout = EXCLUDED.begin_checkout,
                purchases = EXCLUDED.purchases,
                revenue = EXCLUDED.revenue,
                cvr = EXCLUDED.cvr,
                abandon_rate = EXCLUDED.abandon_rate,
                aov = EXCLUDED.aov,
                engagement_rate = EXCLUDED.engagement_rate,
                checkout_completion_rate = EXCLUDED.checkout_completion_rate,
                computed_at = NOW()
            "#,
        )
        .bind(row.campaign_ref)
        .bind(row.creator_ref)
        .bind(row.date)
        .bind(row.counters.page_views)
        .bind(row.counters.add_to_cart)
        .bind(row.counters.begin_checkout)
        .bind(row.counters.purchases)
        .bind(row.counters.revenue)
        .bind(row.ratios.cvr)
        .bind(row.ratios.abandon_rate)
        .bind(row.ratios.aov)
        .bind(row.ratios.engagement_rate)
        .bind(row.ratios.checkout_completion_rate)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn series(
        &self,
        campaign_ref: i64,
        creator_ref: Option<i64>,
    ) -> Result<Vec<DailyPoint>, AppError> {
        let rows: Vec<DailyPointRow> = sqlx::query_as(
            r#"
            SELECT date, page_views, add_to_cart, begin_checkout, purchases,
                   revenue, cvr, abandon_rate, aov, engagement_rate,
                   checkout_completion_rate
            FROM daily_metrics
            WHERE campaign_ref = $1 AND creator_ref IS NOT DISTINCT FROM $2
            ORDER BY date
            "#,
        )
        .bind(campaign_ref)
        .bind(creator_ref)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
