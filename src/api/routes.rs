//! API route configuration.

use crate::api::handlers::{check_handle_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `GET  /stats/{code}`   - Click history for a short code
/// - `POST /check-handle`   - Custom handle availability check
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/{code}", get(stats_handler))
        .route("/check-handle", post(check_handle_handler))
}
