use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use identity_sample::domain::provider::ExternalProvider;
use identity_sample::domain::repository::UserInfoPort;
use identity_sample::error::SampleError;
use identity_sample::infra::userinfo::{HttpUserInfoClient, ProviderEndpoints};

/// Echoes the bearer token back when it is `good`, otherwise 401.
async fn me(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != "Bearer good" {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({ "id": "g-1", "name": "Alice" })))
}

/// Never answers within any test timeout.
async fn stalled() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(60)).await;
    Json(json!({}))
}

async fn spawn_provider() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new()
        .route("/me", get(me))
        .route("/stalled", get(stalled));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/me")
}

fn client(url: &str) -> HttpUserInfoClient {
    HttpUserInfoClient::new(
        ProviderEndpoints {
            facebook: url.to_owned(),
            google: url.to_owned(),
        },
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn should_send_bearer_token_and_parse_payload() {
    let url = spawn_provider().await;

    let payload = client(&url)
        .fetch(ExternalProvider::Google, "good")
        .await
        .unwrap();

    assert_eq!(payload["id"], "g-1");
    assert_eq!(payload["name"], "Alice");
}

#[tokio::test]
async fn should_fail_with_status_when_provider_rejects_token() {
    let url = spawn_provider().await;

    let result = client(&url).fetch(ExternalProvider::Facebook, "bad").await;

    assert!(
        matches!(
            result,
            Err(SampleError::UserInfoUnavailable {
                provider: "Facebook",
                status: 401
            })
        ),
        "expected UserInfoUnavailable, got {result:?}"
    );
}

#[tokio::test]
async fn should_give_up_on_provider_that_never_answers() {
    let url = spawn_provider().await.replace("/me", "/stalled");
    let client = HttpUserInfoClient::new(
        ProviderEndpoints {
            facebook: url.clone(),
            google: url,
        },
        Duration::from_millis(200),
    )
    .unwrap();

    let started = std::time::Instant::now();
    let result = client.fetch(ExternalProvider::Google, "good").await;

    assert!(
        matches!(result, Err(SampleError::Internal(_))),
        "expected transport error, got {result:?}"
    );
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn should_default_to_provider_endpoints() {
    let endpoints = ProviderEndpoints::default();
    assert_eq!(
        endpoints.url_for(ExternalProvider::Google),
        ExternalProvider::Google.default_userinfo_url()
    );
}
