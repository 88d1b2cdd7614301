mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use creatortrace::api::handlers::orders_webhook_handler;
use serde_json::{Value, json};

fn test_server() -> TestServer {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/webhooks/orders", post(orders_webhook_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_order_without_id_is_rejected() {
    let server = test_server();

    let response = server
        .post("/webhooks/orders")
        .json(&json!({ "total_price": "49.90" }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], json!("invalid"));
}

#[tokio::test]
async fn test_order_without_codes_is_acknowledged() {
    let server = test_server();

    let response = server
        .post("/webhooks/orders")
        .add_header("x-shopify-shop-domain", "shop.example.com")
        .json(&json!({
            "id": 5551212,
            "discount_applications": []
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["recorded"], json!(false));
}
