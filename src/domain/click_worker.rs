//! Background worker draining the click queue into the store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Consumes click events and persists them with retry.
///
/// A failed write is retried with jittered exponential backoff (3 attempts)
/// and then dropped with a warning: click logging is best-effort and must
/// never block the queue behind a poisoned event.
pub async fn run_click_worker<R: ClickRepository>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<R>,
) {
    while let Some(ev) = rx.recv().await {
        let click: NewClick = ev.into();
        let click_id = click.click_id.clone();

        let strategy = ExponentialBackoff::from_millis(50)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(3);

        let result = Retry::spawn(strategy, || {
            let click = click.clone();
            let repository = Arc::clone(&repository);
            async move { repository.record(click).await }
        })
        .await;

        match result {
            Ok(_) => metrics::counter!("clicks_recorded_total").increment(1),
            Err(e) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::warn!(click_id, error = %e, "dropping click after retries");
            }
        }
    }

    tracing::info!("click queue closed, worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;
    use crate::domain::repositories::MockClickRepository;
    use crate::error::AppError;
    use chrono::Utc;
    use serde_json::json;

    fn event(id: &str) -> ClickEvent {
        ClickEvent::new(id.to_string(), "cmp-1".to_string(), None, None)
    }

    fn stored(new_click: &NewClick) -> Click {
        Click {
            id: 1,
            click_id: new_click.click_id.clone(),
            campaign_id: new_click.campaign_id.clone(),
            creator_id: new_click.creator_id.clone(),
            ts: new_click.ts,
            user_agent: new_click.user_agent.clone(),
        }
    }

    #[tokio::test]
    async fn test_worker_records_queued_clicks() {
        let mut mock_repo = MockClickRepository::new();
        mock_repo
            .expect_record()
            .times(2)
            .returning(|c| Ok(stored(&c)));

        let (tx, rx) = mpsc::channel(10);
        tx.send(event("ck-1")).await.unwrap();
        tx.send(event("ck-2")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock_repo)).await;
    }

    #[tokio::test]
    async fn test_worker_retries_then_succeeds() {
        let mut mock_repo = MockClickRepository::new();
        let mut calls = 0;
        mock_repo.expect_record().times(2).returning(move |c| {
            calls += 1;
            if calls == 1 {
                Err(AppError::internal("transient", json!({})))
            } else {
                Ok(stored(&c))
            }
        });

        let (tx, rx) = mpsc::channel(10);
        tx.send(event("ck-1")).await.unwrap();
        drop(tx);

        run_click_worker(rx, Arc::new(mock_repo)).await;
    }

    #[tokio::test]
    async fn test_worker_drops_click_after_exhausted_retries() {
        let mut mock_repo = MockClickRepository::new();
        // Initial attempt plus 3 retries.
        mock_repo
            .expect_record()
            .times(4)
            .returning(|_| Err(AppError::internal("down", json!({}))));

        let (tx, rx) = mpsc::channel(10);
        tx.send(event("ck-1")).await.unwrap();
        drop(tx);

        // Worker must terminate despite the permanent failure.
        run_click_worker(rx, Arc::new(mock_repo)).await;
    }
}
