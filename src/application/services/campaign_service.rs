//! Campaign and creator-link management service (panel surface).

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{
    Campaign, CampaignPatch, CreatorLink, DailyPoint, NewCampaign, NewCreatorLink,
};
use crate::domain::repositories::{
    CampaignRepository, CreatorLinkRepository, CreatorRepository, MetricsRepository,
};
use crate::error::AppError;
use crate::utils::code_generator;
use crate::utils::short_code::{self, ShortCodePayload};

/// Input for joining a creator to a campaign.
#[derive(Debug, Clone, Default)]
pub struct JoinCreatorInput {
    pub creator_id: String,
    pub name: Option<String>,
    /// Operator-chosen short code. Validated; generated when absent.
    pub custom_code: Option<String>,
    pub landing_url: Option<String>,
    pub utm_content: Option<String>,
}

/// A created link together with its derived share URLs.
#[derive(Debug, Clone)]
pub struct JoinedCreator {
    pub link: CreatorLink,
    /// Path of the persisted short link, e.g. `/c/spring24`.
    pub short_path: String,
    /// Path of the equivalent stateless token link.
    pub token_path: String,
}

/// Management operations behind the authenticated panel: campaign CRUD,
/// creator onboarding, coupon assignment, and the metric series feed.
pub struct CampaignService<
    C: CampaignRepository,
    R: CreatorRepository,
    L: CreatorLinkRepository,
    M: MetricsRepository,
> {
    campaigns: Arc<C>,
    creators: Arc<R>,
    links: Arc<L>,
    metrics: Arc<M>,
}

impl<C: CampaignRepository, R: CreatorRepository, L: CreatorLinkRepository, M: MetricsRepository>
    CampaignService<C, R, L, M>
{
    pub fn new(campaigns: Arc<C>, creators: Arc<R>, links: Arc<L>, metrics: Arc<M>) -> Self {
        Self {
            campaigns,
            creators,
            links,
            metrics,
        }
    }

    pub async fn create_campaign(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        if new_campaign.campaign_id.trim().is_empty() {
            return Err(AppError::bad_request(
                "invalid",
                "campaign_id must not be empty",
                json!({}),
            ));
        }
        let campaign = self.campaigns.create(new_campaign).await?;
        tracing::info!(campaign_id = %campaign.campaign_id, "campaign created");
        Ok(campaign)
    }

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, AppError> {
        self.campaigns.list_enabled().await
    }

    pub async fn get_campaign(&self, campaign_id: &str) -> Result<Campaign, AppError> {
        self.campaigns
            .find_by_campaign_id(campaign_id)
            .await?
            .ok_or_else(|| campaign_not_found(campaign_id))
    }

    pub async fn update_campaign(
        &self,
        campaign_id: &str,
        patch: CampaignPatch,
    ) -> Result<Campaign, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "invalid",
                "Update contains no fields",
                json!({}),
            ));
        }
        self.campaigns.update(campaign_id, patch).await
    }

    /// Attaches a storefront domain, making the campaign redirect-capable.
    pub async fn connect_shop(&self, campaign_id: &str, shop: &str) -> Result<Campaign, AppError> {
        let shop = shop.trim().trim_end_matches('/');
        let shop = shop
            .strip_prefix("https://")
            .or_else(|| shop.strip_prefix("http://"))
            .unwrap_or(shop);
        if shop.is_empty() || shop.contains('/') {
            return Err(AppError::bad_request(
                "invalid",
                "shop must be a bare domain",
                json!({ "shop": shop }),
            ));
        }

        let patch = CampaignPatch {
            shop: Some(shop.to_string()),
            ..Default::default()
        };
        let campaign = self.campaigns.update(campaign_id, patch).await?;
        tracing::info!(campaign_id, shop, "shop connected");
        Ok(campaign)
    }

    /// Soft delete. The campaign stays addressable for historical metrics
    /// but drops out of listings.
    pub async fn disable_campaign(&self, campaign_id: &str) -> Result<Campaign, AppError> {
        let patch = CampaignPatch {
            enabled: Some(false),
            ..Default::default()
        };
        self.campaigns.update(campaign_id, patch).await
    }

    /// Joins a creator to a campaign: upserts the creator row, settles the
    /// short code (validated custom or generated), creates the link, and
    /// derives both share paths.
    pub async fn join_creator(
        &self,
        campaign_id: &str,
        input: JoinCreatorInput,
    ) -> Result<JoinedCreator, AppError> {
        if input.creator_id.trim().is_empty() {
            return Err(AppError::bad_request(
                "invalid",
                "creator_id must not be empty",
                json!({}),
            ));
        }
        // Fail fast before touching the creator table.
        self.get_campaign(campaign_id).await?;

        let code = match &input.custom_code {
            Some(code) => {
                code_generator::validate_custom_code(code)?;
                code.clone()
            }
            None => code_generator::generate_code(),
        };

        self.creators
            .upsert(&input.creator_id, input.name.as_deref())
            .await?;

        let link = self
            .links
            .create(NewCreatorLink {
                campaign_id: campaign_id.to_string(),
                creator_id: input.creator_id.clone(),
                short_code: Some(code.clone()),
                landing_url: input.landing_url.clone(),
                utm_content: input.utm_content.clone(),
            })
            .await?;

        let token = short_code::encode(&ShortCodePayload {
            ci: campaign_id.to_string(),
            cr: Some(input.creator_id),
            pa: input.landing_url,
        });

        tracing::info!(campaign_id, creator_id = %link.creator_id, code, "creator joined");
        Ok(JoinedCreator {
            link,
            short_path: format!("/c/{code}"),
            token_path: format!("/c/{token}"),
        })
    }

    pub async fn list_creators(&self, campaign_id: &str) -> Result<Vec<CreatorLink>, AppError> {
        self.get_campaign(campaign_id).await?;
        self.links.list_by_campaign(campaign_id).await
    }

    /// Records a provisioned coupon code on an existing link. The discount
    /// itself is created on the commerce platform out of band.
    pub async fn assign_coupon(
        &self,
        campaign_id: &str,
        creator_id: &str,
        coupon_code: &str,
    ) -> Result<CreatorLink, AppError> {
        let coupon_code = coupon_code.trim();
        if coupon_code.is_empty() {
            return Err(AppError::bad_request(
                "invalid",
                "coupon_code must not be empty",
                json!({}),
            ));
        }
        self.links
            .set_coupon(campaign_id, creator_id, coupon_code)
            .await
    }

    /// Daily metric series for dashboards. Without a creator filter the
    /// unattributed bucket is served.
    pub async fn performance(
        &self,
        campaign_id: &str,
        creator_id: Option<&str>,
    ) -> Result<Vec<DailyPoint>, AppError> {
        let campaign = self.get_campaign(campaign_id).await?;

        let creator_ref = match creator_id {
            Some(creator_id) => {
                let creator = self
                    .creators
                    .find_by_creator_id(creator_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found(
                            "not_found",
                            "Creator not found",
                            json!({ "creator_id": creator_id }),
                        )
                    })?;
                Some(creator.id)
            }
            None => None,
        };

        self.metrics.series(campaign.id, creator_ref).await
    }
}

fn campaign_not_found(campaign_id: &str) -> AppError {
    AppError::not_found(
        "not_found",
        "Campaign not found",
        json!({ "campaign_id": campaign_id }),
    )
}
