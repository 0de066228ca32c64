//! DTOs for the custom handle availability check.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CheckHandleRequest {
    #[serde(default)]
    pub handle: String,
}

#[derive(Debug, Serialize)]
pub struct CheckHandleResponse {
    pub available: bool,

    /// Why the handle cannot be used, when it fails the shape rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
