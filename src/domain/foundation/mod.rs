//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the sprint domain.

mod actor;
mod errors;
mod ids;
mod timestamp;

pub use actor::Actor;
pub use errors::ValidationError;
pub use ids::{GroupId, ParticipantId};
pub use timestamp::Timestamp;
