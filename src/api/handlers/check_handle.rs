//! Handler for custom handle availability.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::api::dto::check_handle::{CheckHandleRequest, CheckHandleResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Reports whether a custom handle is free right now.
///
/// # Endpoint
///
/// `POST /api/check-handle`
///
/// A handle that breaks the shape rules is reported as unavailable with the
/// reason in `error`. Nothing is reserved, so `available: true` is only a hint.
///
/// # Errors
///
/// Returns 400 for a malformed body and 500 on store failure.
pub async fn check_handle_handler(
    State(state): State<AppState>,
    payload: Result<Json<CheckHandleRequest>, JsonRejection>,
) -> Result<Json<CheckHandleResponse>, AppError> {
    let Json(payload) = payload?;

    match state.link_service.is_handle_available(&payload.handle).await {
        Ok(available) => Ok(Json(CheckHandleResponse {
            available,
            error: None,
        })),
        Err(AppError::Validation { message, .. }) => Ok(Json(CheckHandleResponse {
            available: false,
            error: Some(message),
        })),
        Err(e) => Err(e),
    }
}
