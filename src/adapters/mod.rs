//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - session stores (Redis, in-memory)
//! - `whatsapp` - Cloud API sender and webhook envelope
//! - `scheduler` - in-process expiry timers
//! - `http` - axum webhook surface

pub mod http;
pub mod scheduler;
pub mod storage;
pub mod whatsapp;

pub use scheduler::{ExpiryWorker, TokioExpiryScheduler};
pub use storage::{InMemorySessionStore, RedisSessionStore};
pub use whatsapp::{CloudApiConfig, CloudApiSender, RecordingSender};
