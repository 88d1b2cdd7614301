//! PostgreSQL implementation of creator repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::Creator;
use crate::domain::repositories::CreatorRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct CreatorRow {
    id: i64,
    creator_id: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CreatorRow> for Creator {
    fn from(row: CreatorRow) -> Self {
        Creator {
            id: row.id,
            creator_id: row.creator_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for creators.
pub struct PgCreatorRepository {
    pool: Arc<PgPool>,
}

impl PgCreatorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreatorRepository for PgCreatorRepository {
    async fn upsert<'a>(
        &self,
        creator_id: &str,
        name: Option<&'a str>,
    ) -> Result<Creator, AppError> {
        // COALESCE keeps an existing name when the caller passes none.
        let row: CreatorRow = sqlx::query_as(
            r#"
            INSERT INTO creators (creator_id, name)
            VALUES ($1, $2)
            ON CONFLICT (creator_id)
            DO UPDATE SET name = COALESCE(EXCLUDED.name, creators.name)
            RETURNING id, creator_id, name, created_at
            "#,
        )
        .bind(creator_id)
        .bind(name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_creator_id(&self, creator_id: &str) -> Result<Option<Creator>, AppError> {
        let row: Option<CreatorRow> = sqlx::query_as(
            "SELECT id, creator_id, name, created_at FROM creators WHERE creator_id = $1",
        )
        .bind(creator_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}
