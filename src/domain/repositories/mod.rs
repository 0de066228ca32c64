//! Storage contracts for the domain layer.
//!
//! Implementations live in `crate::infrastructure`; mocks are generated with
//! `mockall` for unit tests.
//!
//! - [`LinkStore`] - Code to target mapping with TTL and atomic reservation
//! - [`ClickLog`] - Append-only click history

pub mod click_log;
pub mod link_store;

pub use click_log::ClickLog;
pub use link_store::LinkStore;

#[cfg(test)]
pub use click_log::MockClickLog;
#[cfg(test)]
pub use link_store::MockLinkStore;
