use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use identity_sample::infra::userinfo::{HttpUserInfoClient, ProviderEndpoints};
use identity_sample::router::build_router;
use identity_sample::state::AppState;
use identity_testing::offline_stores;

/// Router over stores that cannot reach a server; only requests answered
/// before any database round trip succeed.
async fn offline_server() -> TestServer {
    let state = AppState {
        stores: offline_stores().await,
        userinfo: HttpUserInfoClient::new(ProviderEndpoints::default(), Duration::from_secs(5))
            .unwrap(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_report_liveness_with_request_id() {
    let server = offline_server().await;

    let response = server.get("/healthz").await;

    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = offline_server().await;

    let response = server.get("/readyz").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_return_not_found_for_malformed_user_id() {
    let server = offline_server().await;

    let response = server.get("/users/not-an-object-id").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_unknown_provider() {
    let server = offline_server().await;

    let response = server
        .post("/external/twitter/login")
        .json(&json!({ "access_token": "t" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "UNKNOWN_PROVIDER");
    assert_eq!(body["message"], "unknown provider 'twitter'");
}

#[tokio::test]
async fn should_reject_blank_role_name() {
    let server = offline_server().await;

    let response = server.post("/roles").json(&json!({ "name": " " })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_REQUEST");
}
