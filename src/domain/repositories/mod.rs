//! Repository traits: the document-store boundary of the core.
//!
//! Services depend on these traits only; the PostgreSQL implementations
//! live in [`crate::infrastructure::persistence`] and mockall mocks are
//! generated under `cfg(test)`.

pub mod campaign_repository;
pub mod click_repository;
pub mod creator_link_repository;
pub mod creator_repository;
pub mod event_repository;
pub mod metrics_repository;
pub mod order_attribution_repository;

pub use campaign_repository::CampaignRepository;
pub use click_repository::ClickRepository;
pub use creator_link_repository::CreatorLinkRepository;
pub use creator_repository::CreatorRepository;
pub use event_repository::EventRepository;
pub use metrics_repository::MetricsRepository;
pub use order_attribution_repository::OrderAttributionRepository;

#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use creator_link_repository::MockCreatorLinkRepository;
#[cfg(test)]
pub use creator_repository::MockCreatorRepository;
#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use metrics_repository::MockMetricsRepository;
#[cfg(test)]
pub use order_attribution_repository::MockOrderAttributionRepository;
