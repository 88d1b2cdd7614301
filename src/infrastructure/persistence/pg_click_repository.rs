//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Click, LinkAttribution, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ClickRow {
    id: i64,
    click_id: String,
    campaign_id: String,
    creator_id: Option<String>,
    ts: DateTime<Utc>,
    user_agent: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            click_id: row.click_id,
            campaign_id: row.campaign_id,
            creator_id: row.creator_id,
            ts: row.ts,
            user_agent: row.user_agent,
        }
    }
}

/// PostgreSQL repository for click facts.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row: ClickRow = sqlx::query_as(
            r#"
            INSERT INTO clicks (click_id, campaign_id, creator_id, ts, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, click_id, campaign_id, creator_id, ts, user_agent
            "#,
        )
        .bind(&new_click.click_id)
        .bind(&new_click.campaign_id)
        .bind(&new_click.creator_id)
        .bind(new_click.ts)
        .bind(&new_click.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_attribution(&self, click_id: &str) -> Result<Option<LinkAttribution>, AppError> {
        let row: Option<(String, Option<String>)> = sqlx::query_as(
            "SELECT campaign_id, creator_id FROM clicks WHERE click_id = $1",
        )
        .bind(click_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(campaign_id, creator_id)| LinkAttribution {
            campaign_id,
            creator_id,
        }))
    }
}
