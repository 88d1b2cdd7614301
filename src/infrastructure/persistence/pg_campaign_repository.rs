//! PostgreSQL implementation of campaign repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Campaign, CampaignPatch, NewCampaign};
use crate::domain::repositories::CampaignRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct CampaignRow {
    id: i64,
    campaign_id: String,
    name: Option<String>,
    shop: Option<String>,
    default_landing: Option<String>,
    enabled: bool,
    created_at: DateTime<Utc>,
}

impl From<CampaignRow> for Campaign {
    fn from(row: CampaignRow) -> Self {
        Campaign {
            id: row.id,
            campaign_id: row.campaign_id,
            name: row.name,
            shop: row.shop,
            default_landing: row.default_landing,
            enabled: row.enabled,
            created_at: row.created_at,
        }
    }
}

const CAMPAIGN_COLUMNS: &str =
    "id, campaign_id, name, shop, default_landing, enabled, created_at";

/// PostgreSQL repository for campaign storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgCampaignRepository {
    pool: Arc<PgPool>,
}

impl PgCampaignRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let row: CampaignRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO campaigns (campaign_id, name, shop, default_landing, enabled)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(&new_campaign.campaign_id)
        .bind(&new_campaign.name)
        .bind(&new_campaign.shop)
        .bind(&new_campaign.default_landing)
        .bind(new_campaign.enabled)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_campaign_id(&self, campaign_id: &str) -> Result<Option<Campaign>, AppError> {
        let row: Option<CampaignRow> = sqlx::query_as(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE campaign_id = $1"
        ))
        .bind(campaign_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_enabled(&self) -> Result<Vec<Campaign>, AppError> {
        let rows: Vec<CampaignRow> = sqlx::query_as(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE enabled ORDER BY name NULLS LAST, campaign_id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, campaign_id: &str, patch: CampaignPatch) -> Result<Campaign, AppError> {
        let row: Option<CampaignRow> = sqlx::query_as(&format!(
            r#"
            UPDATE campaigns SET
                name = COALESCE($2, name),
                shop = COALESCE($3, shop),
                default_landing = COALESCE($4, default_landing),
                enabled = COALESCE($5, enabled)
            WHERE campaign_id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(campaign_id)
        .bind(&patch.name)
        .bind(&patch.shop)
        .bind(&patch.default_landing)
        .bind(patch.enabled)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into).ok_or_else(|| {
            AppError::not_found(
                "not_found",
                "Campaign not found",
                serde_json::json!({ "campaign_id": campaign_id }),
            )
        })
    }
}
