//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod check_handle;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod validate_auth;

pub use check_handle::check_handle_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
pub use validate_auth::validate_auth_handler;
