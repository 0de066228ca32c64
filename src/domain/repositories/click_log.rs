//! Contract for the append-only click history.

use crate::domain::entities::{Click, NewClick};
use crate::error::StoreError;
use async_trait::async_trait;

/// Append-only log of click events keyed by short code.
///
/// No referential integrity with the link store: rows may name codes whose
/// mapping has expired, and they are retained.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteClickLog`] - SQLite table `clicks`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickLog: Send + Sync {
    /// Appends one immutable row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors or timeout.
    async fn append(&self, new_click: NewClick) -> Result<Click, StoreError>;

    /// Returns every click for `code`, most recent first.
    ///
    /// Rows sharing a timestamp are ordered by insertion, newest first. An
    /// unknown code yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on database errors or timeout.
    async fn list_by_code(&self, code: &str) -> Result<Vec<Click>, StoreError>;

    /// Checks whether the log database is reachable.
    async fn health_check(&self) -> bool;
}
