//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod aggregate;
pub mod campaigns;
pub mod health;
pub mod links;
pub mod redirect;
pub mod track;
pub mod webhooks;

pub use aggregate::aggregate_handler;
pub use campaigns::{
    connect_shop_handler, create_campaign_handler, disable_campaign_handler, get_campaign_handler,
    list_campaigns_handler, orders_report_handler, performance_handler, update_campaign_handler,
};
pub use health::health_handler;
pub use links::{assign_coupon_handler, join_creator_handler, list_creators_handler};
pub use redirect::redirect_handler;
pub use track::track_handler;
pub use webhooks::orders_webhook_handler;
