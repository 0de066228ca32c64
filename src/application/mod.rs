//! Application layer services implementing business logic.
//!
//! Services consume the storage traits from [`crate::domain::repositories`]
//! and expose the operations HTTP handlers call.
//!
//! # Available Services
//!
//! - [`services::LinkService`] - Short link creation and resolution
//! - [`services::StatsService`] - Click history per code
//! - [`services::AuthValidator`] - Allow-list check for custom handles
//! - [`services::CodeAllocator`] - Random code generation and handle rules
//! - [`services::ClickRecorder`] - Best-effort click hand-off

pub mod services;
