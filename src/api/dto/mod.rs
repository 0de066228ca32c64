//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Input checks
//! live in the services, not here.

pub mod auth;
pub mod check_handle;
pub mod clicks;
pub mod health;
pub mod shorten;
pub mod stats;
