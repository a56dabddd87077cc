//! LeaveSprintHandler - Command handler for `/leave`.
//!
//! When the starter leaves, the caller is expected to end the sprint as
//! `Actor::System`; the outcome says so.

use crate::domain::foundation::{GroupId, ParticipantId};
use crate::domain::sprint::{replies, LeaveOutcome, SprintError};

use super::SessionAccess;

/// Command to leave a sprint.
#[derive(Debug, Clone)]
pub struct LeaveSprintCommand {
    pub group_id: GroupId,
    pub participant_id: ParticipantId,
}

/// Result of leaving.
#[derive(Debug, Clone)]
pub struct LeaveSprintResult {
    pub outcome: LeaveOutcome,
    pub reply: String,
}

/// Handler for `/leave`.
pub struct LeaveSprintHandler {
    sessions: SessionAccess,
}

impl LeaveSprintHandler {
    pub fn new(sessions: SessionAccess) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: LeaveSprintCommand) -> Result<LeaveSprintResult, SprintError> {
        let mut session = self.sessions.load_active(&cmd.group_id).await?;

        let outcome = session.leave(&cmd.participant_id)?;
        self.sessions.save(&session).await?;

        tracing::debug!(
            group_id = %cmd.group_id,
            participant_id = %cmd.participant_id,
            outcome = ?outcome,
            "Participant left sprint"
        );

        Ok(LeaveSprintResult {
            outcome,
            reply: replies::left(&cmd.participant_id),
        })
    }
}
