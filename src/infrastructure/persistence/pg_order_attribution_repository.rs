//! PostgreSQL implementation of the order-attribution repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{CouponOrderCount, NewOrderAttribution};
use crate::domain::repositories::OrderAttributionRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct CouponCountRow {
    coupon_code: String,
    orders: i64,
}

/// PostgreSQL repository for raw order-attribution facts.
pub struct PgOrderAttributionRepository {
    pool: Arc<PgPool>,
}

impl PgOrderAttributionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderAttributionRepository for PgOrderAttributionRepository {
    async fn record(&self, fact: NewOrderAttribution) -> Result<(), AppError> {
        sqlx::query("INSERT INTO order_attributions (order_id, codes, shop) VALUES ($1, $2, $3)")
            .bind(&fact.order_id)
            .bind(&fact.codes)
            .bind(&fact.shop)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn count_orders_by_codes(
        &self,
        codes: &[String],
    ) -> Result<Vec<CouponOrderCount>, AppError> {
        // Match is case-insensitive; distinct orders so a re-delivered
        // webhook does not inflate the count.
        let rows: Vec<CouponCountRow> = sqlx::query_as(
            r#"
            SELECT wanted.code AS coupon_code, COUNT(DISTINCT oa.order_id) AS orders
            FROM UNNEST($1::text[]) AS wanted(code)
            JOIN order_attributions oa
              ON EXISTS (
                SELECT 1 FROM UNNEST(oa.codes) AS used(code)
                WHERE UPPER(used.code) = UPPER(wanted.code)
              )
            GROUP BY wanted.code
            "#,
        )
        .bind(codes)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CouponOrderCount {
                coupon_code: row.coupon_code,
                orders: row.orders,
            })
            .collect())
    }
}
