//! Sprint domain module.
//!
//! A sprint is a timed, group-scoped writing session. Each group has at most
//! one active sprint; participants self-report word counts and the starter
//! (or the expiry timer) ends it with a summary.
//!
//! # Lifecycle
//!
//! Absent → Active (`/sprint`) → Absent (`/end`, starter `/leave`, expiry).
//! There is no retained "ended" state: a finished session is deleted.

mod aggregate;
mod command;
mod duration;
mod errors;
pub mod replies;
mod summary;

pub use aggregate::{LeaveOutcome, ParticipantProgress, SprintSession};
pub use command::{parse_word_count, SprintCommand, COMMAND_PREFIX};
pub use duration::SprintDuration;
pub use errors::SprintError;
pub use summary::{ParticipantTally, SprintSummary};
