//! Order-webhook ingestion and coupon correlation.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::domain::entities::{CouponOrderCount, NewOrderAttribution};
use crate::domain::repositories::{
    CampaignRepository, CreatorLinkRepository, OrderAttributionRepository,
};
use crate::error::AppError;

/// Result of processing one order-creation delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookOutcome {
    pub order_id: String,
    pub codes: Vec<String>,
    /// `false` when the order carried no discount codes and nothing was
    /// recorded.
    pub recorded: bool,
}

/// Consumes verified order-creation webhook payloads and serves the
/// coupon-correlation report.
///
/// Only the order id and its discount codes are kept; the full payload is
/// discarded. Correlation back to campaigns happens at report time by
/// matching recorded codes against provisioned coupon codes.
pub struct WebhookService<O: OrderAttributionRepository, L: CreatorLinkRepository, C: CampaignRepository>
{
    orders: Arc<O>,
    links: Arc<L>,
    campaigns: Arc<C>,
}

impl<O: OrderAttributionRepository, L: CreatorLinkRepository, C: CampaignRepository>
    WebhookService<O, L, C>
{
    pub fn new(orders: Arc<O>, links: Arc<L>, campaigns: Arc<C>) -> Self {
        Self {
            orders,
            links,
            campaigns,
        }
    }

    /// Processes one order-creation payload.
    ///
    /// An order without an id is rejected as `invalid`; an order without
    /// discount codes is acknowledged without recording anything, so the
    /// sender never retries it.
    pub async fn ingest_order(&self, shop: &str, payload: &Value) -> Result<WebhookOutcome, AppError> {
        let Some(order_id) = extract_order_id(payload) else {
            return Err(AppError::bad_request(
                "invalid",
                "Order payload has no id",
                json!({}),
            ));
        };

        let codes = extract_discount_codes(payload);
        if codes.is_empty() {
            tracing::debug!(order_id, "order without discount codes, nothing to record");
            return Ok(WebhookOutcome {
                order_id,
                codes,
                recorded: false,
            });
        }

        self.orders
            .record(NewOrderAttribution {
                order_id: order_id.clone(),
                codes: codes.clone(),
                shop: shop.to_string(),
            })
            .await?;
        metrics::counter!("orders_attributed_total").increment(1);
        tracing::info!(order_id, codes = ?codes, "order attribution recorded");

        Ok(WebhookOutcome {
            order_id,
            codes,
            recorded: true,
        })
    }

    /// Orders-per-coupon report for one campaign. Coupons with zero orders
    /// are included so dashboards can show the full roster.
    pub async fn orders_report(&self, campaign_id: &str) -> Result<Vec<CouponOrderCount>, AppError> {
        if self
            .campaigns
            .find_by_campaign_id(campaign_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "not_found",
                "Campaign not found",
                json!({ "campaign_id": campaign_id }),
            ));
        }

        let codes = self.links.coupon_codes_for_campaign(campaign_id).await?;
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let counted = self.orders.count_orders_by_codes(&codes).await?;
        let mut report: Vec<CouponOrderCount> = codes
            .into_iter()
            .map(|coupon_code| {
                let orders = counted
                    .iter()
                    .find(|c| c.coupon_code == coupon_code)
                    .map(|c| c.orders)
                    .unwrap_or(0);
                CouponOrderCount {
                    coupon_code,
                    orders,
                }
            })
            .collect();
        report.sort_by(|a, b| b.orders.cmp(&a.orders).then(a.coupon_code.cmp(&b.coupon_code)));
        Ok(report)
    }
}

/// Order id: numeric or string `id`, falling back to the GraphQL gid.
fn extract_order_id(payload: &Value) -> Option<String> {
    match payload.get("id") {
        Some(Value::Number(n)) => return Some(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
        _ => {}
    }
    payload
        .get("admin_graphql_api_id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Discount codes from `discount_applications[].code` (snake or camel case,
/// both appear in the wild), deduplicated preserving order.
fn extract_discount_codes(payload: &Value) -> Vec<String> {
    let applications = payload
        .get("discount_applications")
        .or_else(|| payload.get("discountApplications"))
        .and_then(Value::as_array);

    let mut codes = Vec::new();
    for application in applications.into_iter().flatten() {
        if let Some(code) = application.get("code").and_then(Value::as_str) {
            let code = code.trim();
            if !code.is_empty() && !codes.iter().any(|c| c == code) {
                codes.push(code.to_string());
            }
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockCampaignRepository, MockCreatorLinkRepository, MockOrderAttributionRepository,
    };
    use crate::domain::entities::Campaign;
    use chrono::Utc;

    fn service(
        orders: MockOrderAttributionRepository,
        links: MockCreatorLinkRepository,
        campaigns: MockCampaignRepository,
    ) -> WebhookService<
        MockOrderAttributionRepository,
        MockCreatorLinkRepository,
        MockCampaignRepository,
    > {
        WebhookService::new(Arc::new(orders), Arc::new(links), Arc::new(campaigns))
    }

    fn campaign(campaign_id: &str) -> Campaign {
        Campaign {
            id: 1,
            campaign_id: campaign_id.to_string(),
            name: None,
            shop: Some("shop.example.com".to_string()),
            default_landing: None,
            enabled: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_order_with_codes_is_recorded() {
        let mut orders = MockOrderAttributionRepository::new();
        orders
            .expect_record()
            .withf(|fact| {
                fact.order_id == "5551212"
                    && fact.codes == vec!["SAVE10".to_string()]
                    && fact.shop == "shop.example.com"
            })
            .times(1)
            .returning(|_| Ok(()));

        let payload = json!({
            "id": 5551212,
            "discount_applications": [
                { "type": "discount_code", "code": "SAVE10" }
            ]
        });
        let outcome = service(orders, MockCreatorLinkRepository::new(), MockCampaignRepository::new())
            .ingest_order("shop.example.com", &payload)
            .await
            .unwrap();

        assert!(outcome.recorded);
        assert_eq!(outcome.order_id, "5551212");
    }

    #[tokio::test]
    async fn test_order_without_codes_is_acknowledged_not_recorded() {
        let mut orders = MockOrderAttributionRepository::new();
        orders.expect_record().times(0);

        let payload = json!({ "id": "ord-1", "discount_applications": [] });
        let outcome = service(orders, MockCreatorLinkRepository::new(), MockCampaignRepository::new())
            .ingest_order("shop.example.com", &payload)
            .await
            .unwrap();

        assert!(!outcome.recorded);
        assert!(outcome.codes.is_empty());
    }

    #[tokio::test]
    async fn test_order_without_id_is_invalid() {
        let payload = json!({ "discount_applications": [{ "code": "SAVE10" }] });
        let result = service(
            MockOrderAttributionRepository::new(),
            MockCreatorLinkRepository::new(),
            MockCampaignRepository::new(),
        )
        .ingest_order("shop.example.com", &payload)
        .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_order_id_falls_back_to_graphql_gid() {
        let payload = json!({ "admin_graphql_api_id": "gid://shopify/Order/5551212" });
        assert_eq!(
            extract_order_id(&payload),
            Some("gid://shopify/Order/5551212".to_string())
        );
    }

    #[test]
    fn test_discount_codes_camel_case_and_dedup() {
        let payload = json!({
            "discountApplications": [
                { "code": "SAVE10" },
                { "code": "SAVE10" },
                { "code": "  CREATOR5 " },
                { "title": "automatic discount" }
            ]
        });
        assert_eq!(
            extract_discount_codes(&payload),
            vec!["SAVE10".to_string(), "CREATOR5".to_string()]
        );
    }

    #[tokio::test]
    async fn test_orders_report_includes_zero_coupons() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_campaign_id()
            .times(1)
            .returning(|id| Ok(Some(campaign(id))));
        let mut links = MockCreatorLinkRepository::new();
        links
            .expect_coupon_codes_for_campaign()
            .times(1)
            .returning(|_| Ok(vec!["SAVE10".to_string(), "CREATOR5".to_string()]));
        let mut orders = MockOrderAttributionRepository::new();
        orders
            .expect_count_orders_by_codes()
            .times(1)
            .returning(|_| {
                Ok(vec![CouponOrderCount {
                    coupon_code: "CREATOR5".to_string(),
                    orders: 3,
                }])
            });

        let report = service(orders, links, campaigns)
            .orders_report("cmp-1")
            .await
            .unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].coupon_code, "CREATOR5");
        assert_eq!(report[0].orders, 3);
        assert_eq!(report[1].coupon_code, "SAVE10");
        assert_eq!(report[1].orders, 0);
    }

    #[tokio::test]
    async fn test_orders_report_unknown_campaign() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_campaign_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(
            MockOrderAttributionRepository::new(),
            MockCreatorLinkRepository::new(),
            campaigns,
        )
        .orders_report("cmp-gone")
        .await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_orders_report_without_coupons_short_circuits() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_campaign_id()
            .times(1)
            .returning(|id| Ok(Some(campaign(id))));
        let mut links = MockCreatorLinkRepository::new();
        links
            .expect_coupon_codes_for_campaign()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let mut orders = MockOrderAttributionRepository::new();
        orders.expect_count_orders_by_codes().times(0);

        let report = service(orders, links, campaigns)
            .orders_report("cmp-1")
            .await
            .unwrap();
        assert!(report.is_empty());
    }
}
