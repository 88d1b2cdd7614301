mod common;

use axum::{Router, middleware};
use axum_test::TestServer;
use creatortrace::api;
use creatortrace::api::middleware::auth;
use serde_json::{Value, json};

fn test_server() -> TestServer {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .nest(
            "/api",
            api::routes::protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        )
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let server = test_server();

    let response = server.get("/api/campaigns").await;

    response.assert_status_unauthorized();
    let body: Value = response.json();
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("unauthorized"));
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let server = test_server();

    let response = server
        .get("/api/campaigns")
        .add_header("Authorization", "Bearer wrong-token")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let server = test_server();

    let response = server
        .get("/api/campaigns")
        .add_header("Authorization", "Basic dXNlcjpwYXNz")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_all_panel_routes_require_auth() {
    let server = test_server();

    for path in [
        "/api/campaigns",
        "/api/campaigns/cmp-1",
        "/api/campaigns/cmp-1/creators",
        "/api/campaigns/cmp-1/performance",
        "/api/campaigns/cmp-1/orders",
    ] {
        let response = server.get(path).await;
        response.assert_status_unauthorized();
    }
}
