//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /c/{code}`        - Short link redirect (public)
//! - `POST /track`           - Tracking event ingest (public)
//! - `POST /webhooks/orders` - Order-creation webhook (public)
//! - `GET  /cron/aggregate`  - Daily aggregation trigger (public)
//! - `GET  /health`          - Health check: DB, cache, click queue (public)
//! - `/api/*`                - Panel API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token on the panel routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    aggregate_handler, health_handler, orders_webhook_handler, redirect_handler, track_handler,
};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer(behind_proxy));

    let public_router = Router::new()
        .route("/c/{code}", get(redirect_handler))
        .route("/track", post(track_handler))
        .route("/webhooks/orders", post(orders_webhook_handler))
        .route("/cron/aggregate", get(aggregate_handler))
        .layer(rate_limit::layer(behind_proxy));

    let router = Router::new()
        .merge(public_router)
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
