//! PostgreSQL implementation of the campaign/creator link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{CreatorLink, LinkAttribution, NewCreatorLink};
use crate::domain::repositories::CreatorLinkRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct CreatorLinkRow {
    id: i64,
    campaign_id: String,
    creator_id: String,
    short_code: Option<String>,
    coupon_code: Option<String>,
    landing_url: Option<String>,
    utm_content: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CreatorLinkRow> for CreatorLink {
    fn from(row: CreatorLinkRow) -> Self {
        CreatorLink {
            id: row.id,
            campaign_id: row.campaign_id,
            creator_id: row.creator_id,
            short_code: row.short_code,
            coupon_code: row.coupon_code,
            landing_url: row.landing_url,
            utm_content: row.utm_content,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct AttributionRow {
    campaign_id: String,
    creator_id: Option<String>,
}

impl From<AttributionRow> for LinkAttribution {
    fn from(row: AttributionRow) -> Self {
        LinkAttribution {
            campaign_id: row.campaign_id,
            creator_id: row.creator_id,
        }
    }
}

const LINK_COLUMNS: &str =
    "id, campaign_id, creator_id, short_code, coupon_code, landing_url, utm_content, created_at";

/// PostgreSQL repository for campaign ↔ creator links.
pub struct PgCreatorLinkRepository {
    pool: Arc<PgPool>,
}

impl PgCreatorLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreatorLinkRepository for PgCreatorLinkRepository {
    async fn create(&self, new_link: NewCreatorLink) -> Result<CreatorLink, AppError> {
        let row: CreatorLinkRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO creator_links (campaign_id, creator_id, short_code, landing_url, utm_content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.campaign_id)
        .bind(&new_link.creator_id)
        .bind(&new_link.short_code)
        .bind(&new_link.landing_url)
        .bind(&new_link.utm_content)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<CreatorLink>, AppError> {
        let row: Option<CreatorLinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM creator_links WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_coupon(&self, coupon: &str) -> Result<Option<LinkAttribution>, AppError> {
        // Coupon codes are matched case-insensitively: checkouts often
        // normalize what the shopper typed.
        let row: Option<AttributionRow> = sqlx::query_as(
            "SELECT campaign_id, creator_id FROM creator_links WHERE UPPER(coupon_code) = UPPER($1)",
        )
        .bind(coupon)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_utm_content(
        &self,
        utm_content: &str,
    ) -> Result<Option<LinkAttribution>, AppError> {
        let row: Option<AttributionRow> = sqlx::query_as(
            "SELECT campaign_id, creator_id FROM creator_links WHERE utm_content = $1",
        )
        .bind(utm_content)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_campaign(&self, campaign_id: &str) -> Result<Vec<CreatorLink>, AppError> {
        let rows: Vec<CreatorLinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM creator_links WHERE campaign_id = $1 ORDER BY created_at DESC"
        ))
        .bind(campaign_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_coupon(
        &self,
        campaign_id: &str,
        creator_id: &str,
        coupon_code: &str,
    ) -> Result<CreatorLink, AppError> {
        let row: Option<CreatorLinkRow> = sqlx::query_as(&format!(
            r#"
            UPDATE creator_links SET coupon_code = $3
            WHERE campaign_id = $1 AND creator_id = $2
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(campaign_id)
        .bind(creator_id)
        .bind(coupon_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::not_found(
                "not_found",
                "Creator is not linked to this campaign",
                serde_json::json!({ "campaign_id": campaign_id, "creator_id": creator_id }),
            )
        })
    }

    async fn coupon_codes_for_campaign(
        &self,
        campaign_id: &str,
    ) -> Result<Vec<String>, AppError> {
        let codes: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT coupon_code FROM creator_links
            WHERE campaign_id = $1 AND coupon_code IS NOT NULL
            ORDER BY coupon_code
            "#,
        )
        .bind(campaign_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(codes.into_iter().map(|(code,)| code).collect())
    }
}
