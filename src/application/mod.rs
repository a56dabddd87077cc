//! Application layer - command handlers and dispatch.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    ChatDispatcher, GroupLocks, InboundMessage, SprintEngine, SprintSettings,
    UnknownCommandPolicy,
};
