//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, actor, timestamp, errors)
//! - `sprint` - Sprint session aggregate, command parsing and replies

pub mod foundation;
pub mod sprint;
