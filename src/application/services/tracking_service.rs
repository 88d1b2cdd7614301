//! Tracking-event ingest service.

use std::sync::Arc;

use crate::application::services::attribution_service::{AttributionInput, AttributionService};
use crate::domain::entities::NewTrackingEvent;
use crate::domain::repositories::{ClickRepository, CreatorLinkRepository, EventRepository};
use crate::error::AppError;

/// Outcome of one ingest batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    /// Events written to the store.
    pub accepted: usize,
    /// Purchase events dropped because their order was already recorded.
    pub deduplicated: usize,
}

/// Writes client tracking events through the attribution resolver.
///
/// Each event in a batch is attributed independently and the resolved
/// campaign/creator overwrite whatever the client sent (except an explicit
/// creator id, which the resolver keeps). Purchases with an order id go
/// through create-if-absent so client retries cannot double-count revenue.
pub struct TrackingService<L: CreatorLinkRepository, K: ClickRepository, E: EventRepository> {
    attribution: AttributionService<L, K>,
    events: Arc<E>,
}

impl<L: CreatorLinkRepository, K: ClickRepository, E: EventRepository> TrackingService<L, K, E> {
    pub fn new(attribution: AttributionService<L, K>, events: Arc<E>) -> Self {
        Self { attribution, events }
    }

    /// Ingests a batch. The batch is not transactional: events are written
    /// one by one and the first store failure aborts the remainder.
    pub async fn ingest(&self, batch: Vec<NewTrackingEvent>) -> Result<IngestSummary, AppError> {
        let mut summary = IngestSummary {
            accepted: 0,
            deduplicated: 0,
        };

        for mut event in batch {
            let input = AttributionInput {
                campaign_id: event.campaign_id.clone(),
                creator_id: event.creator_id.clone(),
                click_id: event.click_id.clone(),
                utm: event.utm.clone(),
                payload: event.payload.clone(),
            };
            let attribution = self.attribution.resolve(&input).await?;
            event.campaign_id = attribution.campaign_id;
            event.creator_id = attribution.creator_id;

            match event.dedup_key() {
                Some(key) => {
                    if self.events.create_if_absent(&key, event).await? {
                        summary.accepted += 1;
                    } else {
                        tracing::debug!(dedup_key = %key, "duplicate purchase dropped");
                        summary.deduplicated += 1;
                    }
                }
                None => {
                    self.events.append(event).await?;
                    summary.accepted += 1;
                }
            }
        }

        metrics::counter!("events_ingested_total").increment(summary.accepted as u64);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkAttribution;
    use crate::domain::repositories::{
        MockClickRepository, MockCreatorLinkRepository, MockEventRepository,
    };
    use chrono::Utc;
    use serde_json::{Map, Value, json};

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn event(name: &str, payload: Value) -> NewTrackingEvent {
        NewTrackingEvent {
            event: name.to_string(),
            ts: Utc::now(),
            session_id: "session-abc".to_string(),
            campaign_id: Some("cmp-1".to_string()),
            creator_id: None,
            click_id: None,
            source: Some("web".to_string()),
            url: None,
            referer: None,
            utm: Map::new(),
            payload: map(payload),
        }
    }

    fn service(
        links: MockCreatorLinkRepository,
        clicks: MockClickRepository,
        events: MockEventRepository,
    ) -> TrackingService<MockCreatorLinkRepository, MockClickRepository, MockEventRepository> {
        TrackingService::new(
            AttributionService::new(Arc::new(links), Arc::new(clicks)),
            Arc::new(events),
        )
    }

    #[tokio::test]
    async fn test_plain_events_are_appended() {
        let mut events = MockEventRepository::new();
        events
            .expect_append()
            .times(2)
            .withf(|e| e.campaign_id == Some("cmp-1".to_string()))
            .returning(|_| Ok(()));
        events.expect_create_if_absent().times(0);

        let svc = service(
            MockCreatorLinkRepository::new(),
            MockClickRepository::new(),
            events,
        );
        let summary = svc
            .ingest(vec![
                event("page_view", json!({})),
                event("add_to_cart", json!({ "value": 19.9 })),
            ])
            .await
            .unwrap();

        assert_eq!(summary, IngestSummary { accepted: 2, deduplicated: 0 });
    }

    #[tokio::test]
    async fn test_purchase_with_order_id_is_deduplicated() {
        let mut events = MockEventRepository::new();
        events
            .expect_create_if_absent()
            .withf(|key, _| key == "purchase-ord-7")
            .times(2)
            .returning({
                let mut first = true;
                move |_, _| {
                    let written = first;
                    first = false;
                    Ok(written)
                }
            });
        events.expect_append().times(0);

        let svc = service(
            MockCreatorLinkRepository::new(),
            MockClickRepository::new(),
            events,
        );
        let summary = svc
            .ingest(vec![
                event("purchase", json!({ "orderId": "ord-7", "value": 50 })),
                event("purchase", json!({ "orderId": "ord-7", "value": 50 })),
            ])
            .await
            .unwrap();

        assert_eq!(summary, IngestSummary { accepted: 1, deduplicated: 1 });
    }

    #[tokio::test]
    async fn test_purchase_without_order_id_is_a_plain_append() {
        let mut events = MockEventRepository::new();
        events.expect_append().times(1).returning(|_| Ok(()));
        events.expect_create_if_absent().times(0);

        let svc = service(
            MockCreatorLinkRepository::new(),
            MockClickRepository::new(),
            events,
        );
        let summary = svc
            .ingest(vec![event("purchase", json!({ "value": 50 }))])
            .await
            .unwrap();

        assert_eq!(summary.accepted, 1);
    }

    #[tokio::test]
    async fn test_resolved_attribution_overwrites_client_fields() {
        let mut links = MockCreatorLinkRepository::new();
        links
            .expect_find_by_coupon()
            .withf(|c| c == "SAVE10")
            .times(1)
            .returning(|_| {
                Ok(Some(LinkAttribution {
                    campaign_id: "cmp-coupon".to_string(),
                    creator_id: Some("cr-coupon".to_string()),
                }))
            });
        let mut events = MockEventRepository::new();
        events
            .expect_append()
            .withf(|e| {
                e.campaign_id == Some("cmp-coupon".to_string())
                    && e.creator_id == Some("cr-coupon".to_string())
            })
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(links, MockClickRepository::new(), events);
        svc.ingest(vec![event("begin_checkout", json!({ "coupon": "SAVE10" }))])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_store_failure_aborts_batch() {
        let mut events = MockEventRepository::new();
        events
            .expect_append()
            .times(1)
            .returning(|_| Err(AppError::internal("store down", json!({}))));

        let svc = service(
            MockCreatorLinkRepository::new(),
            MockClickRepository::new(),
            events,
        );
        let result = svc
            .ingest(vec![event("page_view", json!({})), event("page_view", json!({}))])
            .await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
