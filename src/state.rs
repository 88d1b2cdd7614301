//! Shared application state injected into handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::application::services::{
    AggregationService, AttributionService, CampaignService, RedirectService, TrackingService,
    WebhookService,
};
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{
    PgCampaignRepository, PgClickRepository, PgCreatorLinkRepository, PgCreatorRepository,
    PgEventRepository, PgMetricsRepository, PgOrderAttributionRepository,
};

/// Concrete service types wired over the PostgreSQL repositories.
pub type AppRedirectService = RedirectService<PgCreatorLinkRepository, PgCampaignRepository>;
pub type AppTrackingService =
    TrackingService<PgCreatorLinkRepository, PgClickRepository, PgEventRepository>;
pub type AppAggregationService = AggregationService<
    PgEventRepository,
    PgCampaignRepository,
    PgCreatorRepository,
    PgMetricsRepository,
>;
pub type AppCampaignService = CampaignService<
    PgCampaignRepository,
    PgCreatorRepository,
    PgCreatorLinkRepository,
    PgMetricsRepository,
>;
pub type AppWebhookService =
    WebhookService<PgOrderAttributionRepository, PgCreatorLinkRepository, PgCampaignRepository>;

/// Shared state for all routes. Cheap to clone: every field is an `Arc`,
/// a pool handle, or a channel sender.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<AppRedirectService>,
    pub tracking_service: Arc<AppTrackingService>,
    pub aggregation_service: Arc<AppAggregationService>,
    pub campaign_service: Arc<AppCampaignService>,
    pub webhook_service: Arc<AppWebhookService>,
    pub cache: Arc<dyn CacheService>,
    pub click_tx: mpsc::Sender<ClickEvent>,
    pub db: PgPool,
    /// Bearer token expected by the panel routes.
    pub panel_token: String,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    pub fn new(
        pool: PgPool,
        cache: Arc<dyn CacheService>,
        click_tx: mpsc::Sender<ClickEvent>,
        panel_token: String,
        cache_ttl_seconds: u64,
    ) -> Self {
        let pool_arc = Arc::new(pool.clone());
        let campaigns = Arc::new(PgCampaignRepository::new(pool_arc.clone()));
        let creators = Arc::new(PgCreatorRepository::new(pool_arc.clone()));
        let links = Arc::new(PgCreatorLinkRepository::new(pool_arc.clone()));
        let clicks = Arc::new(PgClickRepository::new(pool_arc.clone()));
        let events = Arc::new(PgEventRepository::new(pool_arc.clone()));
        let metrics = Arc::new(PgMetricsRepository::new(pool_arc.clone()));
        let orders = Arc::new(PgOrderAttributionRepository::new(pool_arc));

        let redirect_service = Arc::new(RedirectService::new(
            links.clone(),
            campaigns.clone(),
            cache.clone(),
            cache_ttl_seconds,
        ));
        let tracking_service = Arc::new(TrackingService::new(
            AttributionService::new(links.clone(), clicks.clone()),
            events.clone(),
        ));
        let aggregation_service = Arc::new(AggregationService::new(
            events,
            campaigns.clone(),
            creators.clone(),
            metrics.clone(),
        ));
        let campaign_service = Arc::new(CampaignService::new(
            campaigns.clone(),
            creators,
            links.clone(),
            metrics,
        ));
        let webhook_service = Arc::new(WebhookService::new(orders, links, campaigns));

        Self {
            redirect_service,
            tracking_service,
            aggregation_service,
            campaign_service,
            webhook_service,
            cache,
            click_tx,
            db: pool,
            panel_token,
        }
    }
}
