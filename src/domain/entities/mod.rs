//! Core business entities.

pub mod campaign;
pub mod click;
pub mod creator;
pub mod creator_link;
pub mod daily_metric;
pub mod order_attribution;
pub mod tracking_event;

pub use campaign::{Campaign, CampaignPatch, NewCampaign};
pub use click::{Click, NewClick};
pub use creator::Creator;
pub use creator_link::{CreatorLink, LinkAttribution, NewCreatorLink};
pub use daily_metric::{DailyMetricRow, DailyPoint, MetricCounters, MetricRatios};
pub use order_attribution::{CouponOrderCount, NewOrderAttribution, OrderAttribution};
pub use tracking_event::{DayEvent, EventKind, NewTrackingEvent};
