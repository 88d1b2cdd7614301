//! PostgreSQL implementation of the tracking-event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{DayEvent, NewTrackingEvent};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct DayEventRow {
    event: String,
    campaign_id: Option<String>,
    creator_id: Option<String>,
    payload: Value,
}

impl From<DayEventRow> for DayEvent {
    fn from(row: DayEventRow) -> Self {
        DayEvent {
            event: row.event,
            campaign_id: row.campaign_id,
            creator_id: row.creator_id,
            payload: row.payload,
        }
    }
}

const INSERT_EVENT: &str = r#"
    INSERT INTO tracking_events
        (dedup_key, event, ts, session_id, campaign_id, creator_id, click_id,
         source, url, referer, utm, payload)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
"#;

/// PostgreSQL repository for the append-only tracking-event log.
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn insert(&self, dedup_key: Option<&str>, event: NewTrackingEvent) -> Result<u64, AppError> {
        let result = sqlx::query(&format!(
            "{INSERT_EVENT} ON CONFLICT (dedup_key) DO NOTHING"
        ))
        .bind(dedup_key)
        .bind(&event.event)
        .bind(event.ts)
        .bind(&event.session_id)
        .bind(&event.campaign_id)
        .bind(&event.creator_id)
        .bind(&event.click_id)
        .bind(&event.source)
        .bind(&event.url)
        .bind(&event.referer)
        .bind(Value::Object(event.utm))
        .bind(Value::Object(event.payload))
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn append(&self, event: NewTrackingEvent) -> Result<(), AppError> {
        self.insert(None, event).await?;
        Ok(())
    }

    async fn create_if_absent(
        &self,
        dedup_key: &str,
        event: NewTrackingEvent,
    ) -> Result<bool, AppError> {
        Ok(self.insert(Some(dedup_key), event).await? > 0)
    }

    async fn fetch_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DayEvent>, AppError> {
        let rows: Vec<DayEventRow> = sqlx::query_as(
            r#"
            SELECT event, campaign_id, creator_id, payload
            FROM tracking_events
            WHERE ts >= $1 AND ts <= $2
            ORDER BY ts
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
