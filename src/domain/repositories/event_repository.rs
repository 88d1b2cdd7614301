//! Repository trait for tracking-event data access.

use crate::domain::entities::{DayEvent, NewTrackingEvent};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the append-only tracking-event log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Appends an event. Every call writes a new fact.
    async fn append(&self, event: NewTrackingEvent) -> Result<(), AppError>;

    /// Create-if-absent write keyed by `dedup_key`.
    ///
    /// Returns `true` when the event was written, `false` when a fact with
    /// the same key already existed (the write is silently dropped).
    async fn create_if_absent(
        &self,
        dedup_key: &str,
        event: NewTrackingEvent,
    ) -> Result<bool, AppError>;

    /// Fetches the aggregator's projection of all events in a time window
    /// (inclusive on both ends).
    async fn fetch_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DayEvent>, AppError>;
}
