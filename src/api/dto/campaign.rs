//! DTOs for campaign management endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{CampaignPatch, NewCampaign};

/// Request to create a campaign.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 128))]
    pub campaign_id: String,
    pub name: Option<String>,
    pub shop: Option<String>,
    pub default_landing: Option<String>,
    /// Defaults to enabled.
    pub enabled: Option<bool>,
}

impl From<CreateCampaignRequest> for NewCampaign {
    fn from(req: CreateCampaignRequest) -> Self {
        NewCampaign {
            campaign_id: req.campaign_id,
            name: req.name,
            shop: req.shop,
            default_landing: req.default_landing,
            enabled: req.enabled.unwrap_or(true),
        }
    }
}

/// Partial campaign update. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub shop: Option<String>,
    pub default_landing: Option<String>,
    pub enabled: Option<bool>,
}

impl From<UpdateCampaignRequest> for CampaignPatch {
    fn from(req: UpdateCampaignRequest) -> Self {
        CampaignPatch {
            name: req.name,
            shop: req.shop,
            default_landing: req.default_landing,
            enabled: req.enabled,
        }
    }
}

/// Request to attach a storefront domain to a campaign.
#[derive(Debug, Deserialize, Validate)]
pub struct ConnectShopRequest {
    #[validate(length(min = 1))]
    pub campaign_id: String,
    #[validate(length(min = 1))]
    pub shop: String,
}
