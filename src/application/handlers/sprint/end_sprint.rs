//! EndSprintHandler - Command handler for closing a sprint.
//!
//! Used for an explicit `/end`, for the cascade after the starter leaves and
//! for automatic expiry. The last two act as `Actor::System`.

use crate::domain::foundation::{Actor, GroupId, Timestamp};
use crate::domain::sprint::{replies, SprintError, SprintSummary};
use crate::ports::ExpiryTrigger;

use super::SessionAccess;

/// Command to end a sprint.
#[derive(Debug, Clone)]
pub struct EndSprintCommand {
    pub group_id: GroupId,
    pub actor: Actor,
    /// When set, only the sprint this trigger was armed for is ended, so a
    /// since-restarted sprint is left alone.
    pub trigger: Option<ExpiryTrigger>,
}

impl EndSprintCommand {
    pub fn by(group_id: GroupId, actor: Actor) -> Self {
        Self {
            group_id,
            actor,
            trigger: None,
        }
    }
}

/// Result of a finished sprint.
#[derive(Debug, Clone)]
pub struct EndSprintResult {
    pub summary: SprintSummary,
    pub reply: String,
}

/// Handler for `/end`.
pub struct EndSprintHandler {
    sessions: SessionAccess,
}

impl EndSprintHandler {
    pub fn new(sessions: SessionAccess) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: EndSprintCommand) -> Result<EndSprintResult, SprintError> {
        // 1. Load the running sprint
        let mut session = self.sessions.load_active(&cmd.group_id).await?;
        if let Some(trigger) = &cmd.trigger {
            if !trigger.matches(&session) {
                return Err(SprintError::NoActiveSession);
            }
        }

        // 2. Authorize and close
        let summary = session.finish(&cmd.actor, Timestamp::now())?;
        let reply = replies::summary(&summary);

        // 3. Drop the record
        self.sessions.remove(&session).await;

        tracing::info!(
            group_id = %cmd.group_id,
            actor = %cmd.actor,
            elapsed_minutes = summary.elapsed_minutes,
            total_words = summary.total_words(),
            "Sprint ended"
        );

        Ok(EndSprintResult { summary, reply })
    }
}
