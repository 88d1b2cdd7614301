//! DTOs for creator-link and coupon endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::{JoinCreatorInput, JoinedCreator};
use crate::domain::entities::CreatorLink;

/// Request to join a creator to a campaign.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinCreatorRequest {
    #[validate(length(min = 1, max = 128))]
    pub creator_id: String,
    pub name: Option<String>,
    /// Custom short code; a random one is generated when absent.
    pub custom_code: Option<String>,
    pub landing_url: Option<String>,
    pub utm_content: Option<String>,
}

impl From<JoinCreatorRequest> for JoinCreatorInput {
    fn from(req: JoinCreatorRequest) -> Self {
        JoinCreatorInput {
            creator_id: req.creator_id,
            name: req.name,
            custom_code: req.custom_code,
            landing_url: req.landing_url,
            utm_content: req.utm_content,
        }
    }
}

/// Created link with its share paths.
#[derive(Debug, Serialize)]
pub struct JoinCreatorResponse {
    pub ok: bool,
    pub link: CreatorLink,
    pub short_path: String,
    pub token_path: String,
}

impl From<JoinedCreator> for JoinCreatorResponse {
    fn from(joined: JoinedCreator) -> Self {
        JoinCreatorResponse {
            ok: true,
            link: joined.link,
            short_path: joined.short_path,
            token_path: joined.token_path,
        }
    }
}

/// Request to record a provisioned coupon code on a link.
#[derive(Debug, Deserialize, Validate)]
pub struct CouponRequest {
    #[validate(length(min = 1))]
    pub campaign_id: String,
    #[validate(length(min = 1))]
    pub creator_id: String,
    #[validate(length(min = 1))]
    pub coupon_code: String,
}
