//! Contract for the key-value store holding short link mappings.

use crate::error::StoreError;
use async_trait::async_trait;
use std::time::Duration;

/// Key-value store mapping short codes to target URLs.
///
/// The store owns expiry: a key whose TTL has elapsed must behave exactly like
/// a key that was never written.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisLinkStore`] - Redis, `SET NX` reservation
/// - [`crate::infrastructure::store::MemoryLinkStore`] - In-process map for development and tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Returns whether `code` currently maps to a live target.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport failure or timeout.
    async fn exists(&self, code: &str) -> Result<bool, StoreError>;

    /// Atomically claims `code` for `target`.
    ///
    /// Returns `Ok(true)` when this call won the reservation and `Ok(false)` when
    /// the code was already live. Of any number of concurrent callers for one
    /// code, at most one observes `true`. `ttl = None` disables expiry.
    ///
    /// Not safe to retry after an ambiguous failure: the write may have landed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport failure or timeout.
    async fn reserve(
        &self,
        code: &str,
        target: &str,
        ttl: Option<Duration>,
    ) -> Result<bool, StoreError>;

    /// Looks up the target for `code`; `Ok(None)` when absent or expired.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on transport failure or timeout.
    async fn get(&self, code: &str) -> Result<Option<String>, StoreError>;

    /// Checks whether the backend is reachable.
    async fn health_check(&self) -> bool;
}
