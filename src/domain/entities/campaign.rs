//! Campaign entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A marketing campaign owned by the operator.
///
/// `campaign_id` is the stable business key referenced by short links and
/// tracking events; `id` is the storage identifier used by metric rows.
/// Campaigns are never hard-deleted: disabling sets `enabled = false`.
#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    #[serde(skip)]
    pub id: i64,
    pub campaign_id: String,
    pub name: Option<String>,
    /// Storefront domain, e.g. `shop.example.com`. A campaign without a
    /// shop cannot serve redirects.
    pub shop: Option<String>,
    pub default_landing: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn is_configured(&self) -> bool {
        self.shop.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Input for creating a campaign.
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub campaign_id: String,
    pub name: Option<String>,
    pub shop: Option<String>,
    pub default_landing: Option<String>,
    pub enabled: bool,
}

/// Partial update for an existing campaign. `None` fields are unchanged.
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub shop: Option<String>,
    pub default_landing: Option<String>,
    pub enabled: Option<bool>,
}

impl CampaignPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.shop.is_none()
            && self.default_landing.is_none()
            && self.enabled.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(shop: Option<&str>) -> Campaign {
        Campaign {
            id: 1,
            campaign_id: "cmp-1".to_string(),
            name: None,
            shop: shop.map(str::to_string),
            default_landing: None,
            enabled: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_configured() {
        assert!(campaign(Some("shop.example.com")).is_configured());
        assert!(!campaign(None).is_configured());
        assert!(!campaign(Some("")).is_configured());
    }

    #[test]
    fn test_empty_patch() {
        assert!(CampaignPatch::default().is_empty());
        let patch = CampaignPatch {
            enabled: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
