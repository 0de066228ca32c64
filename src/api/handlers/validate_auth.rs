//! Handler for authorization code checks.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::auth::{ValidateAuthRequest, ValidateAuthResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Tells a client whether an authorization code would unlock custom handles.
///
/// # Endpoint
///
/// `POST /validate-auth`
///
/// # Response Codes
///
/// - **200 OK**: `{"valid": true}` or `{"valid": false, "message": "..."}`
/// - **400 Bad Request**: empty code or malformed body
///
/// The code itself never appears in logs.
pub async fn validate_auth_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidateAuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ValidateAuthResponse>), AppError> {
    let Json(payload) = payload?;

    if payload.auth_code.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ValidateAuthResponse::invalid(
                "Authorization code cannot be empty",
            )),
        ));
    }

    let response = if state.auth_validator.validate(&payload.auth_code) {
        ValidateAuthResponse::valid()
    } else {
        ValidateAuthResponse::invalid("Invalid authorization code")
    };

    Ok((StatusCode::OK, Json(response)))
}
