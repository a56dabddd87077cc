//! Expiry scheduling port.
//!
//! A scheduled trigger always fires; it is never cancelled when a sprint
//! ends early. Whoever handles the trigger must re-read the store and only
//! act if the same sprint is still running.

use crate::domain::foundation::{GroupId, Timestamp};
use crate::domain::sprint::SprintSession;

/// Request to end a group's sprint once its time is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryTrigger {
    pub group_id: GroupId,
    /// Start of the sprint this trigger belongs to. Distinguishes it from a
    /// later sprint in the same group.
    pub started_at: Timestamp,
    pub fire_at: Timestamp,
}

impl ExpiryTrigger {
    /// Trigger for the natural end of a session.
    pub fn for_session(session: &SprintSession) -> Self {
        Self {
            group_id: session.group_id().clone(),
            started_at: *session.start_time(),
            fire_at: *session.end_time(),
        }
    }

    /// True if `session` is the sprint this trigger was scheduled for.
    pub fn matches(&self, session: &SprintSession) -> bool {
        session.group_id() == &self.group_id
            && session.start_time().as_unix_millis() == self.started_at.as_unix_millis()
    }
}

/// Port for deferring a sprint's automatic end.
pub trait ExpiryScheduler: Send + Sync {
    /// Arrange for `trigger` to be handled at `trigger.fire_at`.
    fn schedule(&self, trigger: ExpiryTrigger);
}
