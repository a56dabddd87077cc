//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - TTL-bounded per-group session persistence
//! - `MessageSender` - Best-effort outbound chat messages
//! - `ExpiryScheduler` - Deferred automatic end of a sprint

mod expiry_scheduler;
mod message_sender;
mod session_store;

pub use expiry_scheduler::{ExpiryScheduler, ExpiryTrigger};
pub use message_sender::{MessageSendError, MessageSender};
pub use session_store::{session_key, SessionStore, SessionStoreError, SESSION_KEY_PREFIX};
