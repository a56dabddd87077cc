//! Who is performing a sprint operation.

use std::fmt;

use super::ParticipantId;

/// The identity behind a command.
///
/// `System` never arrives over the wire: it is only constructed by the
/// expiry path and by the starter-leaves cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Participant(ParticipantId),
    System,
}

impl From<ParticipantId> for Actor {
    fn from(id: ParticipantId) -> Self {
        Actor::Participant(id)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Participant(id) => write!(f, "{}", id),
            Actor::System => write!(f, "SYSTEM"),
        }
    }
}
