mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use common::{create_test_server, create_test_state};
use riid::domain::repositories::LinkStore;
use riid::error::StoreError;
use riid::routes::router;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Link store whose backend is permanently unreachable.
struct DownLinkStore;

#[async_trait]
impl LinkStore for DownLinkStore {
    async fn exists(&self, _code: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn reserve(
        &self,
        _code: &str,
        _target: &str,
        _ttl: Option<Duration>,
    ) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _code: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Timeout {
            operation: "get",
            after: Duration::from_millis(3000),
        })
    }

    async fn health_check(&self) -> bool {
        false
    }
}

async fn down_server() -> TestServer {
    let state = create_test_state(Arc::new(DownLinkStore)).await;
    TestServer::new(router(state)).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["link_store"]["status"], "ok");
    assert_eq!(json["checks"]["click_log"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = create_test_server().await;

    let json = server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("time").is_some());
    assert!(json["checks"].get("link_store").is_some());
    assert!(json["checks"].get("click_log").is_some());
    assert!(json["checks"].get("click_queue").is_some());
}

#[tokio::test]
async fn test_health_reports_link_store_down() {
    let server = down_server().await;

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["checks"]["link_store"]["status"], "error");
}

#[tokio::test]
async fn test_store_failure_on_create_is_internal() {
    let server = down_server().await;

    let response = server
        .post("/shorten")
        .json(&json!({ "long_url": "example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert!(!json["error"]["message"].as_str().unwrap().contains("refused"));
}

#[tokio::test]
async fn test_store_failure_on_redirect_records_nothing() {
    let server = down_server().await;

    server
        .get("/abc123")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    tokio::time::sleep(Duration::from_millis(50)).await;

    let stats = server.get("/api/stats/abc123").await.json::<Value>();
    assert_eq!(stats["total_clicks"], 0);
}
