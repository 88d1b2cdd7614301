//! API route configuration.
//!
//! All panel endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    assign_coupon_handler, connect_shop_handler, create_campaign_handler,
    disable_campaign_handler, get_campaign_handler, join_creator_handler, list_campaigns_handler,
    list_creators_handler, orders_report_handler, performance_handler, update_campaign_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All panel routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /campaigns`                  - List enabled campaigns
/// - `POST   /campaigns`                  - Create a campaign
/// - `POST   /campaigns/connect`          - Attach a storefront domain
/// - `GET    /campaigns/{id}`             - Fetch one campaign
/// - `PATCH  /campaigns/{id}`             - Partially update a campaign
/// - `DELETE /campaigns/{id}`             - Disable a campaign (soft delete)
/// - `GET    /campaigns/{id}/creators`    - List creator links
/// - `POST   /campaigns/{id}/creators`    - Join a creator
/// - `GET    /campaigns/{id}/performance` - Daily metric series
/// - `GET    /campaigns/{id}/orders`      - Coupon correlation report
/// - `POST   /coupons`                    - Record a provisioned coupon code
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            get(list_campaigns_handler).post(create_campaign_handler),
        )
        .route("/campaigns/connect", post(connect_shop_handler))
        .route(
            "/campaigns/{id}",
            get(get_campaign_handler)
                .patch(update_campaign_handler)
                .delete(disable_campaign_handler),
        )
        .route(
            "/campaigns/{id}/creators",
            get(list_creators_handler).post(join_creator_handler),
        )
        .route("/campaigns/{id}/performance", get(performance_handler))
        .route("/campaigns/{id}/orders", get(orders_report_handler))
        .route("/coupons", post(assign_coupon_handler))
}
