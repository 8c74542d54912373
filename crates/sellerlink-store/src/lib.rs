//! Token store backends.
//!
//! The in-memory store is the default; when a Redis URL is configured the
//! [`FallbackTokenStore`] wraps it so the process stays correct (if less
//! durable) while the cache is unreachable.

pub mod fallback;
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

pub use fallback::FallbackTokenStore;
pub use memory::MemoryTokenStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisTokenStore;
