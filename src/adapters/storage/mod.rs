//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **RedisSessionStore** - Shared, TTL-bounded store for production
//! - **InMemorySessionStore** - Process-local store (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use wordsprint::adapters::storage::{InMemorySessionStore, RedisSessionStore};
//!
//! // Production: Redis
//! let store = RedisSessionStore::connect("redis://localhost:6379").await?;
//!
//! // Testing: in-memory
//! let store = InMemorySessionStore::new();
//! ```

mod in_memory_session_store;
mod redis_session_store;

pub use in_memory_session_store::InMemorySessionStore;
pub use redis_session_store::RedisSessionStore;
