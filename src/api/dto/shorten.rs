//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::CreateLinkRequest;

/// Request to shorten a single URL.
///
/// A missing `long_url` deserializes to an empty string so it is reported
/// through the regular validation error rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub long_url: String,

    /// Optional custom code; requires `auth_code`.
    pub custom_handle: Option<String>,

    pub auth_code: Option<String>,

    /// `0` for no expiry, otherwise `1..=3650`. Only honoured with a custom handle.
    pub expiration_days: Option<i64>,
}

impl From<ShortenRequest> for CreateLinkRequest {
    fn from(req: ShortenRequest) -> Self {
        CreateLinkRequest {
            long_url: req.long_url,
            custom_handle: req.custom_handle,
            auth_code: req.auth_code,
            expiration_days: req.expiration_days,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
