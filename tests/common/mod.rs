#![allow(dead_code)]

use axum_test::TestServer;
use riid::config::Config;
use riid::domain::click_event::ClickEvent;
use riid::domain::click_worker::run_click_worker;
use riid::domain::repositories::{ClickLog, LinkStore};
use riid::infrastructure::persistence::SqliteClickLog;
use riid::infrastructure::store::MemoryLinkStore;
use riid::routes::router;
use riid::server::build_state;
use riid::state::AppState;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const AUTH_CODE: &str = "test-auth-code";
pub const BASE_URL: &str = "https://riid.test";

pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        app_domain: "riid.test".to_string(),
        app_scheme: "https".to_string(),
        redis_url: None,
        redis_key_prefix: String::new(),
        click_db_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        auth_codes: vec![AUTH_CODE.to_string(), "second-code".to_string()],
        code_length: 9,
        code_seed: None,
        click_queue_capacity: 1000,
        store_timeout_ms: 5000,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
    }
}

pub async fn memory_click_log() -> Arc<SqliteClickLog> {
    Arc::new(
        SqliteClickLog::connect("sqlite::memory:", 1, Duration::from_secs(5))
            .await
            .unwrap(),
    )
}

/// State wired to the given link store, an in-memory click log and a running
/// click worker.
pub async fn create_test_state(link_store: Arc<dyn LinkStore>) -> AppState {
    let config = test_config();
    let click_log: Arc<dyn ClickLog> = memory_click_log().await;

    let (click_tx, click_rx) = mpsc::channel::<ClickEvent>(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_log.clone()));

    build_state(&config, link_store, click_log, click_tx)
}

/// Full router over an in-memory link store.
pub async fn create_test_server() -> TestServer {
    let state = create_test_state(Arc::new(MemoryLinkStore::new())).await;
    TestServer::new(router(state)).unwrap()
}

/// Creates a link and returns its code.
pub async fn shorten(server: &TestServer, body: Value) -> String {
    let response = server.post("/shorten").json(&body).await;
    response.assert_status_ok();

    let short_url = response.json::<Value>()["short_url"]
        .as_str()
        .unwrap()
        .to_string();

    short_url
        .strip_prefix(&format!("{}/", BASE_URL))
        .unwrap()
        .to_string()
}

/// Polls the stats endpoint until `expected` clicks are visible.
///
/// Clicks are written by the background worker, so they appear shortly after
/// the redirect is served.
pub async fn wait_for_clicks(server: &TestServer, code: &str, expected: u64) -> Value {
    for _ in 0..200 {
        let stats = server
            .get(&format!("/api/stats/{}", code))
            .await
            .json::<Value>();

        if stats["total_clicks"].as_u64() == Some(expected) {
            return stats;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("expected {} clicks for '{}'", expected, code);
}
