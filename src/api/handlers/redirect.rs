//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look the code up in the link store
/// 2. Queue a click event with `User-Agent` and `Referer` (fire-and-forget)
/// 3. Return 301 Moved Permanently
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or expired and 500 on store
/// failure. No click is recorded for either.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let referrer = headers.get(header::REFERER).and_then(|v| v.to_str().ok());

    let target = state
        .link_service
        .resolve_and_record(&code, user_agent, referrer)
        .await?;

    // 301, not the 308 that `Redirect::permanent` sends.
    let location = HeaderValue::try_from(target.as_str()).map_err(|e| {
        error!(code = %code, error = %e, "Stored target is not a valid header value");
        AppError::internal("Invalid redirect target", json!({ "code": code }))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
