//! Link store backends.
//!
//! - [`RedisLinkStore`] - Production store; reservation is a single `SET NX`
//! - [`MemoryLinkStore`] - In-process map used when Redis is not configured and in tests

mod memory_link_store;
mod redis_link_store;

pub use memory_link_store::MemoryLinkStore;
pub use redis_link_store::RedisLinkStore;
