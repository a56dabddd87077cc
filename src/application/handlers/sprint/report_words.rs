//! ReportWordsHandler - Command handler for `/words <n>`.

use crate::domain::foundation::{GroupId, ParticipantId};
use crate::domain::sprint::{parse_word_count, replies, SprintError};

use super::SessionAccess;

/// Command to replace a participant's word count.
#[derive(Debug, Clone)]
pub struct ReportWordsCommand {
    pub group_id: GroupId,
    pub participant_id: ParticipantId,
    /// Raw count argument as typed by the user.
    pub count: Option<String>,
}

/// Result of a successful report.
#[derive(Debug, Clone)]
pub struct ReportWordsResult {
    pub word_count: u64,
    pub reply: String,
}

/// Handler for `/words`.
pub struct ReportWordsHandler {
    sessions: SessionAccess,
}

impl ReportWordsHandler {
    pub fn new(sessions: SessionAccess) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: ReportWordsCommand) -> Result<ReportWordsResult, SprintError> {
        // Absence and membership are reported before a bad count.
        let mut session = self.sessions.load_active(&cmd.group_id).await?;
        session
            .ensure_participant(&cmd.participant_id)
            .map_err(|_| SprintError::NotJoined)?;
        let word_count = parse_word_count(cmd.count.as_deref())?;

        session.record_words(&cmd.participant_id, word_count)?;
        self.sessions.save(&session).await?;

        Ok(ReportWordsResult {
            word_count,
            reply: replies::words_updated(&cmd.participant_id, word_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::sprint::{SprintDuration, SprintSession};
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

    fn words(id: &str, count: &str) -> ReportWordsCommand {
        ReportWordsCommand {
            group_id: group(),
            participant_id: user(id),
            count: Some(count.to_string()),
        }
    }

    async fn setup() -> (ReportWordsHandler, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let session = SprintSession::start(group(), user("alice"), SprintDuration::HalfHour);
        store.put(&group(), &session, TTL).await.unwrap();
        let handler = ReportWordsHandler::new(SessionAccess::new(store.clone(), TTL));
        (handler, store)
    }

    async fn stored_count(store: &InMemorySessionStore, id: &str) -> Option<u64> {
        store
            .get(&group())
            .await
            .unwrap()
            .and_then(|s| s.word_count(&user(id)))
    }

    #[tokio::test]
    async fn later_report_replaces_earlier_one() {
        let (handler, store) = setup().await;

        handler.handle(words("alice", "500")).await.unwrap();
        let result = handler.handle(words("alice", "300")).await.unwrap();

        assert_eq!(result.word_count, 300);
        assert_eq!(stored_count(&store, "alice").await, Some(300));
    }

    #[tokio::test]
    async fn invalid_counts_leave_state_untouched() {
        let (handler, store) = setup().await;
        handler.handle(words("alice", "120")).await.unwrap();

        for bad in ["-5", "abc", "x12"] {
            let err = handler.handle(words("alice", bad)).await.unwrap_err();
            assert_eq!(err, SprintError::InvalidWordCount);
        }
        assert_eq!(stored_count(&store, "alice").await, Some(120));
    }

    #[tokio::test]
    async fn fractional_count_records_whole_words() {
        let (handler, store) = setup().await;

        let result = handler.handle(words("alice", "12.5")).await.unwrap();

        assert_eq!(result.word_count, 12);
        assert_eq!(stored_count(&store, "alice").await, Some(12));
    }

    #[tokio::test]
    async fn missing_count_is_invalid() {
        let (handler, _) = setup().await;
        let cmd = ReportWordsCommand {
            count: None,
            ..words("alice", "0")
        };

        assert_eq!(
            handler.handle(cmd).await.unwrap_err(),
            SprintError::InvalidWordCount
        );
    }

    #[tokio::test]
    async fn non_participant_is_rejected_before_count_check() {
        let (handler, _) = setup().await;

        let err = handler.handle(words("mallory", "abc")).await.unwrap_err();

        assert_eq!(err, SprintError::NotJoined);
        assert_eq!(
            err.to_string(),
            "❌ You are not part of this sprint session. Use /join to join."
        );
    }
}
