//! Daily metric aggregation service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::entities::daily_metric::round2;
use crate::domain::entities::{DailyMetricRow, EventKind, MetricCounters};
use crate::domain::repositories::{
    CampaignRepository, CreatorRepository, EventRepository, MetricsRepository,
};
use crate::error::AppError;

/// Bucket key used while folding a day's events. The creator half is empty
/// for unattributed traffic.
type BucketKey = (String, String);

/// Report returned to the cron caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationSummary {
    #[serde(rename = "dayISO")]
    pub day: NaiveDate,
    pub buckets_written: usize,
    pub buckets_skipped: usize,
}

/// Rolls a UTC day's tracking events into one metric row per
/// (campaign, creator-or-absent) bucket.
///
/// Re-running a day is idempotent: rows are written as full replacements,
/// so a re-aggregation converges to the same values regardless of how many
/// times it runs. Buckets whose campaign id does not resolve to a stored
/// campaign are skipped with a warning rather than failing the whole day.
pub struct AggregationService<
    E: EventRepository,
    C: CampaignRepository,
    R: CreatorRepository,
    M: MetricsRepository,
> {
    events: Arc<E>,
    campaigns: Arc<C>,
    creators: Arc<R>,
    metrics: Arc<M>,
}

impl<E: EventRepository, C: CampaignRepository, R: CreatorRepository, M: MetricsRepository>
    AggregationService<E, C, R, M>
{
    pub fn new(events: Arc<E>, campaigns: Arc<C>, creators: Arc<R>, metrics: Arc<M>) -> Self {
        Self {
            events,
            campaigns,
            creators,
            metrics,
        }
    }

    pub async fn aggregate_day(&self, day: NaiveDate) -> Result<AggregationSummary, AppError> {
        let (start, end) = day_bounds(day);
        let events = self.events.fetch_window(start, end).await?;
        let event_count = events.len();

        let mut buckets: HashMap<BucketKey, MetricCounters> = HashMap::new();
        for ev in &events {
            let kind = ev.kind();
            if matches!(kind, EventKind::Other(_)) {
                continue;
            }

            let campaign_key = ev
                .campaign_id
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or("unknown")
                .to_string();
            let creator_key = ev.creator_id.clone().unwrap_or_default();

            let counters = buckets.entry((campaign_key, creator_key)).or_default();
            match kind {
                EventKind::PageView => counters.page_views += 1,
                EventKind::AddToCart => counters.add_to_cart += 1,
                EventKind::BeginCheckout => counters.begin_checkout += 1,
                EventKind::Purchase => {
                    counters.purchases += 1;
                    counters.revenue += ev.revenue();
                }
                EventKind::Other(_) => unreachable!(),
            }
        }

        let mut summary = AggregationSummary {
            day,
            buckets_written: 0,
            buckets_skipped: 0,
        };

        for ((campaign_id, creator_id), mut counters) in buckets {
            let Some(campaign) = self.campaigns.find_by_campaign_id(&campaign_id).await? else {
                tracing::warn!(%campaign_id, "skipping bucket for unknown campaign");
                summary.buckets_skipped += 1;
                continue;
            };

            let creator_ref = if creator_id.is_empty() {
                None
            } else {
                Some(self.creators.upsert(&creator_id, None).await?.id)
            };

            counters.revenue = round2(counters.revenue);
            let row = DailyMetricRow {
                campaign_ref: campaign.id,
                creator_ref,
                date: day,
                ratios: counters.ratios(),
                counters,
            };
            self.metrics.replace(row).await?;
            summary.buckets_written += 1;
        }

        tracing::info!(
            day = %day,
            events = event_count,
            written = summary.buckets_written,
            skipped = summary.buckets_skipped,
            "day aggregated"
        );
        Ok(summary)
    }
}

/// Inclusive UTC bounds of a calendar day, millisecond precision.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let end = day
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_default()
        .and_utc();
    (start, end)
}
