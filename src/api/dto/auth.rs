//! DTOs for authorization code validation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ValidateAuthRequest {
    #[serde(default)]
    pub auth_code: String,
}

/// Outcome of an authorization code check.
#[derive(Debug, Serialize)]
pub struct ValidateAuthResponse {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidateAuthResponse {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}
