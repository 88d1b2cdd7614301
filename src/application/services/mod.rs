//! Application services orchestrating the repository layer.

pub mod aggregation_service;
pub mod attribution_service;
pub mod campaign_service;
pub mod redirect_service;
pub mod tracking_service;
pub mod webhook_service;

pub use aggregation_service::{AggregationService, AggregationSummary};
pub use attribution_service::{Attribution, AttributionInput, AttributionService};
pub use campaign_service::{CampaignService, JoinCreatorInput, JoinedCreator};
pub use redirect_service::{Redirect, RedirectService, ResolvedLink};
pub use tracking_service::{IngestSummary, TrackingService};
pub use webhook_service::{WebhookOutcome, WebhookService};
