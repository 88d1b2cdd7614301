mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use creatortrace::api::handlers::redirect_handler;
use serde_json::{Value, json};

fn test_server() -> TestServer {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/c/{code}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_blank_code() {
    let server = test_server();

    // %20 decodes to a single space, which trims to an empty code.
    let response = server.get("/c/%20").await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("missing_code"));
}

#[tokio::test]
async fn test_redirect_missing_code_segment() {
    let server = test_server();

    let response = server.get("/c/").await;

    response.assert_status_not_found();
}
