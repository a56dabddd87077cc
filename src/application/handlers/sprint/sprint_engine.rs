//! SprintEngine - routes chat commands to the sprint handlers.
//!
//! Every routed command yields exactly one reply, except a starter's
//! `/leave`, which yields the leave reply followed by the summary.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::foundation::{Actor, GroupId, ParticipantId};
use crate::domain::sprint::{replies, LeaveOutcome, SprintCommand, SprintError};
use crate::ports::{ExpiryScheduler, ExpiryTrigger, SessionStore};

use super::{
    EndSprintCommand, EndSprintHandler, GroupGuard, GroupLocks, InboundMessage, JoinSprintCommand,
    JoinSprintHandler, LeaveSprintCommand, LeaveSprintHandler, ReportWordsCommand,
    ReportWordsHandler, SessionAccess, StartSprintCommand, StartSprintHandler,
};

/// What to do with `/something` that is not a known command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCommandPolicy {
    /// Stay silent.
    #[default]
    Ignore,
    /// Reply with the list of commands.
    Reply,
}

/// Engine tuning.
#[derive(Debug, Clone)]
pub struct SprintSettings {
    /// Store TTL, refreshed on every write.
    pub session_ttl: Duration,
    pub unknown_command: UnknownCommandPolicy,
    /// Run commands for the same group one at a time.
    pub serialize_per_group: bool,
}

impl Default for SprintSettings {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(3 * 60 * 60),
            unknown_command: UnknownCommandPolicy::default(),
            serialize_per_group: false,
        }
    }
}

/// Command state machine for every group.
pub struct SprintEngine {
    start: StartSprintHandler,
    join: JoinSprintHandler,
    words: ReportWordsHandler,
    end: EndSprintHandler,
    leave: LeaveSprintHandler,
    unknown_command: UnknownCommandPolicy,
    locks: Option<GroupLocks>,
}

impl SprintEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        scheduler: Arc<dyn ExpiryScheduler>,
        settings: SprintSettings,
    ) -> Self {
        let sessions = SessionAccess::new(store, settings.session_ttl);
        Self {
            start: StartSprintHandler::new(sessions.clone(), scheduler),
            join: JoinSprintHandler::new(sessions.clone()),
            words: ReportWordsHandler::new(sessions.clone()),
            end: EndSprintHandler::new(sessions.clone()),
            leave: LeaveSprintHandler::new(sessions),
            unknown_command: settings.unknown_command,
            locks: settings.serialize_per_group.then(GroupLocks::new),
        }
    }

    /// Handles one inbound message and returns the replies to post, in order.
    ///
    /// Chatter that is not a command yields nothing.
    pub async fn handle(&self, message: &InboundMessage) -> Vec<String> {
        let Some(command) = SprintCommand::parse(&message.text) else {
            return Vec::new();
        };

        let _guard = self.lock(&message.group_id).await;

        tracing::debug!(
            group_id = %message.group_id,
            sender_id = %message.sender_id,
            command = command.name(),
            "Handling sprint command"
        );

        match self.route(message, command).await {
            Ok(replies) => replies,
            Err(err) => {
                tracing::debug!(
                    group_id = %message.group_id,
                    error_kind = err.kind(),
                    "Sprint command rejected"
                );
                vec![err.to_string()]
            }
        }
    }

    /// Ends the sprint a trigger was armed for, if it is still running.
    ///
    /// A sprint that was ended early, or ended and restarted, is left alone
    /// and nothing is posted.
    pub async fn expire(&self, trigger: &ExpiryTrigger) -> Vec<String> {
        let _guard = self.lock(&trigger.group_id).await;

        let cmd = EndSprintCommand {
            trigger: Some(trigger.clone()),
            ..EndSprintCommand::by(trigger.group_id.clone(), Actor::System)
        };
        match self.end.handle(cmd).await {
            Ok(result) => vec![result.reply],
            Err(err) => {
                tracing::debug!(
                    group_id = %trigger.group_id,
                    reason = err.kind(),
                    "Expiry skipped"
                );
                Vec::new()
            }
        }
    }

    async fn route(
        &self,
        message: &InboundMessage,
        command: SprintCommand,
    ) -> Result<Vec<String>, SprintError> {
        let group_id = message.group_id.clone();
        let sender_id = message.sender_id.clone();

        let replies = match command {
            SprintCommand::Start { duration } => {
                let cmd = StartSprintCommand {
                    group_id,
                    starter_id: sender_id,
                    duration,
                };
                vec![self.start.handle(cmd).await?.reply]
            }
            SprintCommand::Join => {
                let cmd = JoinSprintCommand {
                    group_id,
                    participant_id: sender_id,
                };
                vec![self.join.handle(cmd).await?.reply]
            }
            SprintCommand::Words { count } => {
                let cmd = ReportWordsCommand {
                    group_id,
                    participant_id: sender_id,
                    count,
                };
                vec![self.words.handle(cmd).await?.reply]
            }
            SprintCommand::End => {
                let cmd = EndSprintCommand::by(group_id, Actor::from(sender_id));
                vec![self.end.handle(cmd).await?.reply]
            }
            SprintCommand::Leave => self.leave(group_id, sender_id).await?,
            SprintCommand::Unknown { name } => {
                tracing::debug!(command = %name, "Unknown command");
                match self.unknown_command {
                    UnknownCommandPolicy::Ignore => Vec::new(),
                    UnknownCommandPolicy::Reply => vec![replies::unknown_command()],
                }
            }
        };
        Ok(replies)
    }

    async fn leave(
        &self,
        group_id: GroupId,
        participant_id: ParticipantId,
    ) -> Result<Vec<String>, SprintError> {
        let left = self
            .leave
            .handle(LeaveSprintCommand {
                group_id: group_id.clone(),
                participant_id,
            })
            .await?;

        let mut replies = vec![left.reply];
        if left.outcome == LeaveOutcome::StarterLeft {
            match self.end.handle(EndSprintCommand::by(group_id, Actor::System)).await {
                Ok(ended) => replies.push(ended.reply),
                Err(err) => replies.push(err.to_string()),
            }
        }
        Ok(replies)
    }

    async fn lock(&self, group_id: &GroupId) -> Option<GroupGuard> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(group_id).await),
            None => None,
        }
    }
}
