//! # riid
//!
//! A short-link service built with Axum, Redis and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, storage contracts and the click worker
//! - **Application Layer** ([`application`]) - Link creation, resolution and statistics
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis/in-memory link stores, SQLite click log
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Random codes, or custom handles unlocked by an authorization code
//! - Link expiry enforced by the store (default one year, up to ten, or never)
//! - Atomic reservation: concurrent creates of one handle yield one winner
//! - Asynchronous, best-effort click tracking with retry
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! export VALID_AUTH_CODES="change-me"
//! export APP_DOMAIN="riid.me" APP_SCHEME="https"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthValidator, ClickRecorder, CodeAllocator, CreateLinkRequest, LinkService, LinkStats,
        StatsService,
    };
    pub use crate::domain::entities::{Click, Expiration, NewClick, ShortLink};
    pub use crate::domain::repositories::{ClickLog, LinkStore};
    pub use crate::error::{AppError, StoreError};
    pub use crate::infrastructure::persistence::SqliteClickLog;
    pub use crate::infrastructure::store::MemoryLinkStore;
    pub use crate::state::AppState;
}
