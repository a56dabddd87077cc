//! StartSprintHandler - Command handler for opening a sprint in a group.

use std::sync::Arc;

use crate::domain::foundation::{GroupId, ParticipantId};
use crate::domain::sprint::{replies, SprintDuration, SprintError, SprintSession};
use crate::ports::{ExpiryScheduler, ExpiryTrigger};

use super::SessionAccess;

/// Command to start a sprint.
#[derive(Debug, Clone)]
pub struct StartSprintCommand {
    pub group_id: GroupId,
    pub starter_id: ParticipantId,
    /// Raw duration argument as typed by the user.
    pub duration: Option<String>,
}

/// Result of successfully starting a sprint.
#[derive(Debug, Clone)]
pub struct StartSprintResult {
    pub session: SprintSession,
    pub trigger: ExpiryTrigger,
    pub reply: String,
}

/// Handler for `/sprint`.
pub struct StartSprintHandler {
    sessions: SessionAccess,
    scheduler: Arc<dyn ExpiryScheduler>,
}

impl StartSprintHandler {
    pub fn new(sessions: SessionAccess, scheduler: Arc<dyn ExpiryScheduler>) -> Self {
        Self {
            sessions,
            scheduler,
        }
    }

    pub async fn handle(&self, cmd: StartSprintCommand) -> Result<StartSprintResult, SprintError> {
        // 1. Only one running sprint per group
        if self.sessions.load(&cmd.group_id).await.is_some() {
            return Err(SprintError::AlreadyActive);
        }

        // 2. Validate the requested length
        let duration = SprintDuration::from_arg(cmd.duration.as_deref())
            .map_err(|_| SprintError::InvalidDuration)?;

        // 3. Create and persist; the starter is joined automatically
        let session = SprintSession::start(cmd.group_id, cmd.starter_id, duration);
        self.sessions.save(&session).await?;

        // 4. Arm the automatic end
        let trigger = ExpiryTrigger::for_session(&session);
        self.scheduler.schedule(trigger.clone());

        tracing::info!(
            group_id = %session.group_id(),
            starter_id = %session.starter_id(),
            duration_minutes = duration.minutes(),
            "Sprint started"
        );

        let reply = replies::sprint_started(&session);
        Ok(StartSprintResult {
            session,
            trigger,
            reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::ports::SessionStore;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingScheduler {
        triggers: Mutex<Vec<ExpiryTrigger>>,
    }

    impl ExpiryScheduler for RecordingScheduler {
        fn schedule(&self, trigger: ExpiryTrigger) {
            self.triggers.lock().unwrap().push(trigger);
        }
    }

    fn group() -> GroupId {
        GroupId::new("group-1").unwrap()
    }

    fn user(id: &str) -> ParticipantId {
        ParticipantId::new(id).unwrap()
    }

    fn command(duration: Option<&str>) -> StartSprintCommand {
        StartSprintCommand {
            group_id: group(),
            starter_id: user("alice"),
            duration: duration.map(str::to_string),
        }
    }

    fn setup() -> (
        StartSprintHandler,
        Arc<InMemorySessionStore>,
        Arc<RecordingScheduler>,
    ) {
        let store = Arc::new(InMemorySessionStore::new());
        let scheduler = Arc::new(RecordingScheduler::default());
        let handler = StartSprintHandler::new(
            SessionAccess::new(store.clone(), Duration::from_secs(60)),
            scheduler.clone(),
        );
        (handler, store, scheduler)
    }

    #[tokio::test]
    async fn starts_sprint_with_default_duration() {
        let (handler, store, _) = setup();

        let result = handler.handle(command(None)).await.unwrap();

        assert_eq!(result.session.duration(), SprintDuration::HalfHour);
        assert!(result.session.is_participant(&user("alice")));
        assert!(result.reply.contains("Duration: 30 minutes"));
        assert!(store.get(&group()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn schedules_expiry_at_end_time() {
        let (handler, _, scheduler) = setup();

        let result = handler.handle(command(Some("90"))).await.unwrap();

        let triggers = scheduler.triggers.lock().unwrap();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].fire_at, *result.session.end_time());
        assert_eq!(triggers[0].started_at, *result.session.start_time());
    }

    #[tokio::test]
    async fn rejects_duration_outside_allowed_set() {
        let (handler, store, scheduler) = setup();

        let err = handler.handle(command(Some("45"))).await.unwrap_err();

        assert_eq!(err, SprintError::InvalidDuration);
        assert_eq!(store.session_count().await, 0);
        assert!(scheduler.triggers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_second_sprint_in_same_group() {
        let (handler, _, scheduler) = setup();
        handler.handle(command(None)).await.unwrap();

        let err = handler.handle(command(Some("60"))).await.unwrap_err();

        assert_eq!(err, SprintError::AlreadyActive);
        assert_eq!(scheduler.triggers.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn already_active_wins_over_bad_duration() {
        let (handler, _, _) = setup();
        handler.handle(command(None)).await.unwrap();

        let err = handler.handle(command(Some("45"))).await.unwrap_err();

        assert_eq!(err, SprintError::AlreadyActive);
    }
}
