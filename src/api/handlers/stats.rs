//! Handler for per-code click statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click history for a short code.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "promo",
///   "total_clicks": 2,
///   "clicks": [
///     { "timestamp": "2025-03-01T10:00:05Z", "user_agent": "curl/8.0" },
///     { "timestamp": "2025-03-01T09:12:44Z", "referrer": "https://news.example" }
///   ]
/// }
/// ```
///
/// An unknown code yields zero clicks rather than 404.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.get_stats(&code).await?;

    Ok(Json(stats.into()))
}
