//! Handler for the daily aggregation cron endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Serialize;

use crate::api::dto::performance::AggregateQuery;
use crate::application::services::AggregationSummary;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub summary: AggregationSummary,
}

/// Runs daily aggregation for one UTC day.
///
/// # Endpoint
///
/// `GET /cron/aggregate?day=YYYY-MM-DD`
///
/// Without `day` the current UTC day is aggregated (the scheduler's normal
/// call; re-running during the day folds in the traffic seen so far).
/// Re-running any day is idempotent; passing an explicit `day` is how
/// historical days are re-aggregated after a backfill.
pub async fn aggregate_handler(
    Query(query): Query<AggregateQuery>,
    State(state): State<AppState>,
) -> Result<Json<AggregateResponse>, AppError> {
    let day = query.day.unwrap_or_else(|| Utc::now().date_naive());

    let summary = state.aggregation_service.aggregate_day(day).await?;
    Ok(Json(AggregateResponse { ok: true, summary }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    #[test]
    fn test_response_serializes_day_as_iso() {
        let response = AggregateResponse {
            ok: true,
            summary: AggregationSummary {
                day: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                buckets_written: 2,
                buckets_skipped: 0,
            },
        };

        let body: Value = serde_json::to_value(&response).unwrap();
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["dayISO"], json!("2024-03-15"));
        assert_eq!(body["buckets_written"], json!(2));
    }

    #[test]
    fn test_default_day_is_today_utc() {
        let query = AggregateQuery { day: None };
        let day = query.day.unwrap_or_else(|| Utc::now().date_naive());
        assert_eq!(day, Utc::now().date_naive());
    }
}
