//! PostgreSQL repository implementations.
//!
//! Each repository implements a domain trait against the shared `PgPool`.
//! Queries are runtime-prepared statements with positional binds.

mod pg_campaign_repository;
mod pg_click_repository;
mod pg_creator_link_repository;
mod pg_creator_repository;
mod pg_event_repository;
mod pg_metrics_repository;
mod pg_order_attribution_repository;

pub use pg_campaign_repository::PgCampaignRepository;
pub use pg_click_repository::PgClickRepository;
pub use pg_creator_link_repository::PgCreatorLinkRepository;
pub use pg_creator_repository::PgCreatorRepository;
pub use pg_event_repository::PgEventRepository;
pub use pg_metrics_repository::PgMetricsRepository;
pub use pg_order_attribution_repository::PgOrderAttributionRepository;
