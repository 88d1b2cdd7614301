//! Event attribution resolver.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::entities::LinkAttribution;
use crate::domain::repositories::{ClickRepository, CreatorLinkRepository};
use crate::error::AppError;

/// Raw attribution signals extracted from an incoming event.
#[derive(Debug, Clone, Default)]
pub struct AttributionInput {
    pub campaign_id: Option<String>,
    pub creator_id: Option<String>,
    pub click_id: Option<String>,
    pub utm: Map<String, Value>,
    pub payload: Map<String, Value>,
}

/// Resolved attribution. An absent creator is a valid terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub campaign_id: Option<String>,
    pub creator_id: Option<String>,
}

/// Maps an event's noisy, partially-missing signals to the owning
/// campaign/creator via a deterministic priority chain:
///
/// 1. an event already carrying a creator id is returned as-is,
/// 2. `payload.coupon` → link lookup by coupon code,
/// 3. `clickId` → click fact lookup,
/// 4. `utm.utm_content` → link lookup by utm marker,
/// 5. fall through to the original campaign id with no creator.
///
/// The chain is total: missing data never produces an error, only store
/// I/O failures propagate.
pub struct AttributionService<L: CreatorLinkRepository, K: ClickRepository> {
    links: Arc<L>,
    clicks: Arc<K>,
}

impl<L: CreatorLinkRepository, K: ClickRepository> AttributionService<L, K> {
    pub fn new(links: Arc<L>, clicks: Arc<K>) -> Self {
        Self { links, clicks }
    }

    pub async fn resolve(&self, input: &AttributionInput) -> Result<Attribution, AppError> {
        // Already attributed: never override an event that names its creator.
        if let Some(creator_id) = input.creator_id.as_deref()
            && !creator_id.is_empty()
        {
            return Ok(Attribution {
                campaign_id: input.campaign_id.clone(),
                creator_id: Some(creator_id.to_string()),
            });
        }

        if let Some(coupon) = input.payload.get("coupon").and_then(Value::as_str)
            && !coupon.is_empty()
            && let Some(link) = self.links.find_by_coupon(coupon).await?
        {
            return Ok(link.into());
        }

        if let Some(click_id) = input.click_id.as_deref()
            && !click_id.is_empty()
            && let Some(click) = self.clicks.find_attribution(click_id).await?
        {
            return Ok(click.into());
        }

        if let Some(utm_content) = input.utm.get("utm_content").and_then(Value::as_str)
            && !utm_content.is_empty()
            && let Some(link) = self.links.find_by_utm_content(utm_content).await?
        {
            return Ok(link.into());
        }

        Ok(Attribution {
            campaign_id: input.campaign_id.clone(),
            creator_id: None,
        })
    }
}

impl From<LinkAttribution> for Attribution {
    fn from(link: LinkAttribution) -> Self {
        Attribution {
            campaign_id: Some(link.campaign_id),
            creator_id: link.creator_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockClickRepository, MockCreatorLinkRepository};
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn link(campaign: &str, creator: &str) -> LinkAttribution {
        LinkAttribution {
            campaign_id: campaign.to_string(),
            creator_id: Some(creator.to_string()),
        }
    }

    fn service(
        links: MockCreatorLinkRepository,
        clicks: MockClickRepository,
    ) -> AttributionService<MockCreatorLinkRepository, MockClickRepository> {
        AttributionService::new(Arc::new(links), Arc::new(clicks))
    }

    #[tokio::test]
    async fn test_existing_creator_short_circuits() {
        let mut links = MockCreatorLinkRepository::new();
        links.expect_find_by_coupon().times(0);
        let mut clicks = MockClickRepository::new();
        clicks.expect_find_attribution().times(0);

        let input = AttributionInput {
            campaign_id: Some("cmp-1".to_string()),
            creator_id: Some("cr-1".to_string()),
            click_id: Some("ck-1".to_string()),
            payload: map(json!({ "coupon": "SAVE10" })),
            ..Default::default()
        };

        let resolved = service(links, clicks).resolve(&input).await.unwrap();
        assert_eq!(resolved.campaign_id, Some("cmp-1".to_string()));
        assert_eq!(resolved.creator_id, Some("cr-1".to_string()));
    }

    #[tokio::test]
    async fn test_coupon_outranks_click_id() {
        let mut links = MockCreatorLinkRepository::new();
        links
            .expect_find_by_coupon()
            .withf(|c| c == "SAVE10")
            .times(1)
            .returning(|_| Ok(Some(link("cmp-coupon", "cr-coupon"))));
        let mut clicks = MockClickRepository::new();
        clicks.expect_find_attribution().times(0);

        let input = AttributionInput {
            click_id: Some("ck-1".to_string()),
            payload: map(json!({ "coupon": "SAVE10" })),
            ..Default::default()
        };

        let resolved = service(links, clicks).resolve(&input).await.unwrap();
        assert_eq!(resolved.campaign_id, Some("cmp-coupon".to_string()));
    }

    #[tokio::test]
    async fn test_click_id_outranks_utm_content() {
        let mut links = MockCreatorLinkRepository::new();
        links.expect_find_by_coupon().times(0);
        links.expect_find_by_utm_content().times(0);
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_find_attribution()
            .withf(|id| id == "ck-1")
            .times(1)
            .returning(|_| Ok(Some(link("cmp-click", "cr-click"))));

        // utm_content resolves to a different campaign; the click must win.
        let input = AttributionInput {
            click_id: Some("ck-1".to_string()),
            utm: map(json!({ "utm_content": "spring-drop" })),
            ..Default::default()
        };

        let resolved = service(links, clicks).resolve(&input).await.unwrap();
        assert_eq!(resolved.campaign_id, Some("cmp-click".to_string()));
        assert_eq!(resolved.creator_id, Some("cr-click".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_click_falls_through_to_utm() {
        let mut links = MockCreatorLinkRepository::new();
        links
            .expect_find_by_utm_content()
            .withf(|u| u == "spring-drop")
            .times(1)
            .returning(|_| Ok(Some(link("cmp-utm", "cr-utm"))));
        let mut clicks = MockClickRepository::new();
        clicks
            .expect_find_attribution()
            .times(1)
            .returning(|_| Ok(None));

        let input = AttributionInput {
            click_id: Some("ck-stale".to_string()),
            utm: map(json!({ "utm_content": "spring-drop" })),
            ..Default::default()
        };

        let resolved = service(links, clicks).resolve(&input).await.unwrap();
        assert_eq!(resolved.campaign_id, Some("cmp-utm".to_string()));
    }

    #[tokio::test]
    async fn test_no_signals_is_a_valid_terminal_state() {
        let links = MockCreatorLinkRepository::new();
        let clicks = MockClickRepository::new();

        let input = AttributionInput {
            campaign_id: Some("cmp-explicit".to_string()),
            ..Default::default()
        };

        let resolved = service(links, clicks).resolve(&input).await.unwrap();
        assert_eq!(resolved.campaign_id, Some("cmp-explicit".to_string()));
        assert_eq!(resolved.creator_id, None);
    }

    #[tokio::test]
    async fn test_non_string_coupon_is_ignored() {
        let mut links = MockCreatorLinkRepository::new();
        links.expect_find_by_coupon().times(0);
        let clicks = MockClickRepository::new();

        let input = AttributionInput {
            payload: map(json!({ "coupon": 42 })),
            ..Default::default()
        };

        let resolved = service(links, clicks).resolve(&input).await.unwrap();
        assert_eq!(resolved.creator_id, None);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut links = MockCreatorLinkRepository::new();
        links
            .expect_find_by_coupon()
            .times(1)
            .returning(|_| Err(AppError::internal("store down", json!({}))));
        let clicks = MockClickRepository::new();

        let input = AttributionInput {
            payload: map(json!({ "coupon": "SAVE10" })),
            ..Default::default()
        };

        let result = service(links, clicks).resolve(&input).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
