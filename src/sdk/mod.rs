//! Server-side client for the tracking ingest endpoint.
//!
//! Integrators embedding event reporting into their own backends use the
//! [`Outbox`] to stage events and flush them in batches.

pub mod outbox;

pub use outbox::{Outbox, OutboxError, OutboxEvent, Transport};
