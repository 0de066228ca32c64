//! SQLite-backed persistence.
//!
//! - [`SqliteClickLog`] - Append-only click history in the `clicks` table

pub mod sqlite_click_log;

pub use sqlite_click_log::SqliteClickLog;
