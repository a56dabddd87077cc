//! JoinSprintHandler - Command handler for joining the running sprint.

use crate::domain::foundation::{GroupId, ParticipantId};
use crate::domain::sprint::{replies, SprintError, SprintSession};

use super::SessionAccess;

/// Command to join a sprint.
#[derive(Debug, Clone)]
pub struct JoinSprintCommand {
    pub group_id: GroupId,
    pub participant_id: ParticipantId,
}

/// Result of successfully joining.
#[derive(Debug, Clone)]
pub struct JoinSprintResult {
    pub session: SprintSession,
    pub reply: String,
}

/// Handler for `/join`.
pub struct JoinSprintHandler {
    sessions: SessionAccess,
}

impl JoinSprintHandler {
    pub fn new(sessions: SessionAccess) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: JoinSprintCommand) -> Result<JoinSprintResult, SprintError> {
        let mut session = self
            .sessions
            .load(&cmd.group_id)
            .await
            .ok_or(SprintError::NoSessionToJoin)?;

        session.join(cmd.participant_id.clone())?;
        self.sessions.save(&session).await?;

        tracing::debug!(
            group_id = %cmd.group_id,
            participant_id = %cmd.participant_id,
            "Participant joined sprint"
        );

        Ok(JoinSprintResult {
            reply: replies::joined(&cmd.participant_id),
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::sprint::SprintDuration;
    use crate::ports::SessionStore;
    use std::sync::Arc;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(60);

    fn group() -> GroupId {
        GroupId::new("group-1").unwrap()
    }

    fn user(id: &str) -> ParticipantId {
        ParticipantId::new(id).unwrap()
    }

    fn join(id: &str) -> JoinSprintCommand {
        JoinSprintCommand {
            group_id: group(),
            participant_id: user(id),
        }
    }

    async fn store_with_sprint() -> Arc<InMemorySessionStore> {
        let store = Arc::new(InMemorySessionStore::new());
        let session = SprintSession::start(group(), user("alice"), SprintDuration::HalfHour);
        store.put(&group(), &session, TTL).await.unwrap();
        store
    }

    #[tokio::test]
    async fn join_adds_participant_with_zero_words() {
        let store = store_with_sprint().await;
        let handler = JoinSprintHandler::new(SessionAccess::new(store.clone(), TTL));

        let result = handler.handle(join("bob")).await.unwrap();

        assert_eq!(result.reply, "✅ <@bob> joined the sprint session!");
        let stored = store.get(&group()).await.unwrap().unwrap();
        let ids: Vec<_> = stored.participants().keys().map(|p| p.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob"]);
        assert_eq!(stored.word_count(&user("bob")), Some(0));
    }

    #[tokio::test]
    async fn join_without_sprint_fails() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = JoinSprintHandler::new(SessionAccess::new(store, TTL));

        let err = handler.handle(join("bob")).await.unwrap_err();

        assert_eq!(err, SprintError::NoSessionToJoin);
    }

    #[tokio::test]
    async fn joining_twice_is_rejected() {
        let store = store_with_sprint().await;
        let handler = JoinSprintHandler::new(SessionAccess::new(store.clone(), TTL));

        let err = handler.handle(join("alice")).await.unwrap_err();

        assert_eq!(err, SprintError::AlreadyJoined);
        let stored = store.get(&group()).await.unwrap().unwrap();
        assert_eq!(stored.participants().len(), 1);
    }
}
