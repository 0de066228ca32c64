//! HTTP server initialization and runtime setup.
//!
//! Handles store connections, worker spawning, and the Axum server lifecycle
//! including graceful shutdown.

use crate::application::services::{
    AuthValidator, ClickRecorder, CodeAllocator, LinkService, StatsService,
};
use crate::config::Config;
use crate::domain::click_event::ClickEvent;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{ClickLog, LinkStore};
use crate::infrastructure::persistence::SqliteClickLog;
use crate::infrastructure::store::{MemoryLinkStore, RedisLinkStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Upper bound on waiting for queued clicks after the listener closes.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Link store (Redis, or the in-memory store when Redis is not configured)
/// - SQLite click log and its migrations
/// - Background click worker
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the listener stops accepting, in-flight requests finish,
/// and the click queue is drained before returning.
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured but unreachable
/// - The click database cannot be opened or migrated
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store_timeout = config.store_timeout();

    let link_store: Arc<dyn LinkStore> = if let Some(redis_url) = &config.redis_url {
        let redis = RedisLinkStore::connect(redis_url, &config.redis_key_prefix, store_timeout)
            .await
            .context("Failed to connect to Redis")?;
        tracing::info!("Link store: Redis");
        Arc::new(redis)
    } else {
        tracing::warn!("Redis is not configured, links are kept in memory and lost on restart");
        Arc::new(MemoryLinkStore::new())
    };

    let click_log: Arc<dyn ClickLog> = Arc::new(
        SqliteClickLog::connect(
            &config.click_db_url,
            config.db_max_connections,
            store_timeout,
        )
        .await
        .context("Failed to open click database")?,
    );
    tracing::info!("Connected to click database");

    let (click_tx, click_rx) = mpsc::channel::<ClickEvent>(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(click_rx, click_log.clone()));

    let state = build_state(&config, link_store, click_log, click_tx);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router, and with it every queue sender, is gone once serve returns.
    tracing::info!("Server stopped, draining click queue");
    match tokio::time::timeout(DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => tracing::info!("Click queue drained"),
        Ok(Err(e)) => tracing::error!(error = %e, "Click worker panicked"),
        Err(_) => tracing::warn!("Click queue not drained within {:?}", DRAIN_TIMEOUT),
    }

    Ok(())
}

/// Wires services into the handler state.
pub fn build_state(
    config: &Config,
    link_store: Arc<dyn LinkStore>,
    click_log: Arc<dyn ClickLog>,
    click_tx: mpsc::Sender<ClickEvent>,
) -> AppState {
    let allocator = match config.code_seed {
        Some(seed) => CodeAllocator::with_seed(config.code_length, seed),
        None => CodeAllocator::new(config.code_length),
    };
    let auth_validator = Arc::new(AuthValidator::new(config.auth_codes.iter().cloned()));
    if !auth_validator.is_enabled() {
        tracing::warn!("VALID_AUTH_CODES is empty, custom handles are disabled");
    }

    let click_recorder = ClickRecorder::new(click_tx);

    let link_service = Arc::new(LinkService::new(
        link_store,
        Arc::new(allocator),
        auth_validator.clone(),
        click_recorder.clone(),
        &config.app_scheme,
        &config.app_domain,
    ));
    let stats_service = Arc::new(StatsService::new(click_log));

    AppState::new(link_service, stats_service, auth_validator, click_recorder)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
