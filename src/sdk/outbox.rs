//! Server-side event outbox for the tracking ingest endpoint.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use thiserror::Error;

/// One event staged for delivery, shaped like the `/track` wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxEvent {
    pub event: String,
    pub ts: i64,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_id: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub utm: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Error)]
pub enum OutboxError {
    #[error("transport error: {0}")]
    Transport(String),
}

/// Delivery seam for the outbox. Implementations post one batch to the
/// collector's `/track` endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, events: &[OutboxEvent]) -> Result<(), OutboxError>;
}

/// Bounded in-memory event queue with explicit flushing.
///
/// Events accumulate until [`Outbox::flush`] drains them in one batch.
/// A failed flush re-queues the batch at the head, so delivery order is
/// preserved across retries. When the queue is full the oldest events are
/// dropped first: recent behavior is worth more than stale history.
pub struct Outbox<T: Transport> {
    queue: VecDeque<OutboxEvent>,
    capacity: usize,
    batch_size: usize,
    transport: T,
}

impl<T: Transport> Outbox<T> {
    pub fn new(transport: T, capacity: usize, batch_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
            batch_size: batch_size.max(1),
            transport,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Stages an event. Returns the number of old events evicted to make
    /// room (zero in the common case).
    pub fn enqueue(&mut self, event: OutboxEvent) -> usize {
        let mut evicted = 0;
        while self.queue.len() >= self.capacity {
            self.queue.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            tracing::warn!(evicted, "outbox full, dropping oldest events");
        }
        self.queue.push_back(event);
        evicted
    }

    /// Sends up to one batch. On failure the batch goes back to the head
    /// of the queue and the error is returned to the caller, which decides
    /// when to retry.
    pub async fn flush(&mut self) -> Result<usize, OutboxError> {
        if self.queue.is_empty() {
            return Ok(0);
        }

        let take = self.batch_size.min(self.queue.len());
        let batch: Vec<OutboxEvent> = self.queue.drain(..take).collect();

        match self.transport.send(&batch).await {
            Ok(()) => Ok(batch.len()),
            Err(e) => {
                for event in batch.into_iter().rev() {
                    self.queue.push_front(event);
                }
                Err(e)
            }
        }
    }

    /// Flushes until the queue is empty or a send fails.
    pub async fn drain(&mut self) -> Result<usize, OutboxError> {
        let mut sent = 0;
        while !self.queue.is_empty() {
            sent += self.flush().await?;
        }
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn event(name: &str) -> OutboxEvent {
        OutboxEvent {
            event: name.to_string(),
            ts: 1_710_500_000_000,
            session_id: "session-abc".to_string(),
            campaign_id: Some("cmp-1".to_string()),
            creator_id: None,
            click_id: None,
            utm: Map::new(),
            payload: Map::new(),
        }
    }

    /// Transport that records batches and can be told to fail.
    struct FakeTransport {
        batches: Mutex<Vec<Vec<String>>>,
        failures_left: Mutex<usize>,
    }

    impl FakeTransport {
        fn new(failures: usize) -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                failures_left: Mutex::new(failures),
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, events: &[OutboxEvent]) -> Result<(), OutboxError> {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(OutboxError::Transport("connection refused".to_string()));
            }
            self.batches
                .lock()
                .unwrap()
                .push(events.iter().map(|e| e.event.clone()).collect());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_flush_sends_one_batch() {
        let mut outbox = Outbox::new(FakeTransport::new(0), 100, 10);
        outbox.enqueue(event("page_view"));
        outbox.enqueue(event("add_to_cart"));

        let sent = outbox.flush().await.unwrap();
        assert_eq!(sent, 2);
        assert!(outbox.is_empty());
    }

    #[tokio::test]
    async fn test_failed_flush_requeues_at_head() {
        let mut outbox = Outbox::new(FakeTransport::new(1), 100, 10);
        outbox.enqueue(event("first"));
        outbox.enqueue(event("second"));

        assert!(outbox.flush().await.is_err());
        assert_eq!(outbox.len(), 2);

        // Enqueue more, then succeed: order must be first, second, third.
        outbox.enqueue(event("third"));
        outbox.flush().await.unwrap();

        let batches = outbox.transport.batches.lock().unwrap();
        assert_eq!(batches[0], vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_full_queue_drops_oldest() {
        let mut outbox = Outbox::new(FakeTransport::new(0), 2, 10);
        outbox.enqueue(event("a"));
        outbox.enqueue(event("b"));
        let evicted = outbox.enqueue(event("c"));
        assert_eq!(evicted, 1);

        outbox.flush().await.unwrap();
        let batches = outbox.transport.batches.lock().unwrap();
        assert_eq!(batches[0], vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_drain_respects_batch_size() {
        let mut outbox = Outbox::new(FakeTransport::new(0), 100, 2);
        for i in 0..5 {
            outbox.enqueue(event(&format!("e{i}")));
        }

        let sent = outbox.drain().await.unwrap();
        assert_eq!(sent, 5);

        let batches = outbox.transport.batches.lock().unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[2].len(), 1);
    }

    #[tokio::test]
    async fn test_flush_on_empty_queue_is_a_noop() {
        let mut outbox = Outbox::new(FakeTransport::new(0), 100, 10);
        assert_eq!(outbox.flush().await.unwrap(), 0);
    }
}
