//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "long_url": "example.com/page",
///   "custom_handle": "promo",   // optional, needs auth_code
///   "auth_code": "...",         // optional
///   "expiration_days": 30       // optional, 0 = never
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "https://riid.me/promo" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request: malformed body, bad URL, bad handle, expiration out of range
/// - 401 Unauthorized: custom handle without a valid auth code
/// - 409 Conflict: custom handle already taken
/// - 500 Internal Server Error: store failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;

    let link = state
        .link_service
        .create_short_link(payload.into())
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.link_service.short_url(&link.code),
    }))
}
