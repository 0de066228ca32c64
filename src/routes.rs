//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`          - Create a short link
//! - `POST /validate-auth`    - Check an authorization code
//! - `GET  /health`           - Link store, click log and click queue status
//! - `GET  /{code}`           - Short link redirect (301)
//! - `/api/*`                 - Statistics and handle availability
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{
    health_handler, redirect_handler, shorten_handler, validate_auth_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// All routes with tracing, without path normalization.
///
/// Fixed routes take precedence over `/{code}`; handles that would collide
/// with them are rejected at creation time.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/validate-auth", post(validate_auth_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}
