mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use creatortrace::api::handlers::track_handler;
use serde_json::{Value, json};

fn test_server() -> TestServer {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/track", post(track_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_track_malformed_json() {
    let server = test_server();

    let response = server
        .post("/track")
        .bytes("{ not json".into())
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("invalid"));
}

#[tokio::test]
async fn test_track_empty_batch() {
    let server = test_server();

    let response = server.post("/track").json(&json!({ "events": [] })).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], json!("invalid"));
}

#[tokio::test]
async fn test_track_short_session_id() {
    let server = test_server();

    let response = server
        .post("/track")
        .json(&json!({
            "events": [{
                "event": "page_view",
                "ts": 1_710_500_000_000i64,
                "sessionId": "short"
            }]
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], json!("invalid"));
}

#[tokio::test]
async fn test_track_non_positive_timestamp() {
    let server = test_server();

    let response = server
        .post("/track")
        .json(&json!({
            "events": [{
                "event": "page_view",
                "ts": 0,
                "sessionId": "session-abc"
            }]
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_track_missing_body() {
    let server = test_server();

    let response = server.post("/track").await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], json!("invalid"));
}
