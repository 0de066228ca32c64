//! Domain layer containing business entities and logic.
//!
//! Nothing in here knows about Redis, SQLite or HTTP. The storage contracts are
//! traits in [`repositories`]; concrete backends live in
//! [`crate::infrastructure`].
//!
//! # Architecture
//!
//! - [`entities`] - Short links, expiration policy and click records
//! - [`repositories`] - Link store and click log contracts
//! - [`click_event`] - Click payload handed from the redirect path to the worker
//! - [`click_worker`] - Background task appending clicks to the log
//!
//! # Click Processing Flow
//!
//! 1. A redirect resolves its target
//! 2. [`click_event::ClickEvent`] is pushed onto a bounded channel
//! 3. [`click_worker::run_click_worker`] appends it with retry
//! 4. The row becomes visible through [`repositories::ClickLog::list_by_code`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
