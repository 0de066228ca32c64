//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: link store reachable
/// - **503 Service Unavailable**: link store down
///
/// The click log and click queue are reported but do not fail the check:
/// redirects keep working without them.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "time": "2025-03-01T10:00:00Z",
///   "checks": {
///     "link_store": { "status": "ok", "message": "Connected" },
///     "click_log": { "status": "ok", "message": "Connected" },
///     "click_queue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let link_store = check_link_store(&state).await;
    let click_log = check_click_log(&state).await;
    let click_queue = check_click_queue(&state);

    let live = link_store.is_ok();
    let status = if !live {
        "unhealthy"
    } else if click_log.is_ok() && click_queue.is_ok() {
        "healthy"
    } else {
        "degraded"
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        time: Utc::now(),
        checks: HealthChecks {
            link_store,
            click_log,
            click_queue,
        },
    };

    if live {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_link_store(state: &AppState) -> CheckStatus {
    if state.link_service.health_check().await {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error("Link store unreachable")
    }
}

async fn check_click_log(state: &AppState) -> CheckStatus {
    if state.stats_service.health_check().await {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error("Click database unreachable")
    }
}

/// Checks if the click tracking queue is operational.
fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_recorder.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.click_recorder.capacity()))
    }
}
