//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the storage contracts defined in
//! [`crate::domain::repositories`].
//!
//! # Modules
//!
//! - [`store`] - Link stores (Redis and in-process)
//! - [`persistence`] - SQLite click log

pub mod persistence;
pub mod store;
