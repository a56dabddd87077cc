//! Background task that fires expiry triggers.
//!
//! # Shutdown
//!
//! The worker listens for a shutdown signal. Timers still pending at
//! shutdown are dropped; the store TTL covers those sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use crate::application::ChatDispatcher;
use crate::domain::foundation::Timestamp;
use crate::ports::ExpiryTrigger;

/// Sleeps until each trigger is due, then asks the dispatcher to expire it.
pub struct ExpiryWorker {
    triggers: mpsc::UnboundedReceiver<ExpiryTrigger>,
    dispatcher: Arc<ChatDispatcher>,
}

impl ExpiryWorker {
    pub fn new(
        triggers: mpsc::UnboundedReceiver<ExpiryTrigger>,
        dispatcher: Arc<ChatDispatcher>,
    ) -> Self {
        Self {
            triggers,
            dispatcher,
        }
    }

    /// Run until the shutdown signal is received.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut timers = JoinSet::new();
        let mut accepting = true;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!(pending = timers.len(), "Expiry worker stopping");
                        return;
                    }
                }

                received = self.triggers.recv(), if accepting => {
                    match received {
                        Some(trigger) => self.arm(&mut timers, trigger),
                        None => accepting = false,
                    }
                }

                Some(joined) = timers.join_next(), if !timers.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "Expiry timer task failed");
                    }
                }
            }
        }
    }

    fn arm(&self, timers: &mut JoinSet<()>, trigger: ExpiryTrigger) {
        let delay = delay_until(&trigger.fire_at);
        tracing::debug!(
            group_id = %trigger.group_id,
            delay_secs = delay.as_secs(),
            "Expiry armed"
        );

        let dispatcher = Arc::clone(&self.dispatcher);
        timers.spawn(async move {
            tokio::time::sleep(delay).await;
            dispatcher.expire(&trigger).await;
        });
    }
}

/// Time left until `fire_at`; zero if it has passed.
fn delay_until(fire_at: &Timestamp) -> Duration {
    fire_at
        .duration_since(&Timestamp::now())
        .to_std()
        .unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scheduler::TokioExpiryScheduler;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::adapters::whatsapp::RecordingSender;
    use crate::application::{SprintEngine, SprintSettings};
    use crate::domain::foundation::{GroupId, ParticipantId};
    use crate::domain::sprint::{SprintDuration, SprintSession};
    use crate::ports::{ExpiryScheduler, SessionStore};

    const TTL: Duration = Duration::from_secs(60);

    fn group() -> GroupId {
        GroupId::new("group-1").unwrap()
    }

    struct Fixture {
        scheduler: TokioExpiryScheduler,
        store: Arc<InMemorySessionStore>,
        sender: RecordingSender,
        shutdown_tx: watch::Sender<bool>,
        handle: tokio::task::JoinHandle<()>,
    }

    fn spawn_worker() -> Fixture {
        let store = Arc::new(InMemorySessionStore::new());
        let (scheduler, rx) = TokioExpiryScheduler::channel();
        let engine = Arc::new(SprintEngine::new(
            store.clone(),
            Arc::new(scheduler.clone()),
            SprintSettings::default(),
        ));
        let sender = RecordingSender::new();
        let dispatcher = Arc::new(ChatDispatcher::new(engine, Arc::new(sender.clone())));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(ExpiryWorker::new(rx, dispatcher).run(shutdown_rx));
        Fixture {
            scheduler,
            store,
            sender,
            shutdown_tx,
            handle,
        }
    }

    /// A session whose natural end is `ms` milliseconds from now.
    fn session_ending_in(ms: i64) -> SprintSession {
        let now = Timestamp::now().as_unix_millis();
        let start = Timestamp::from_unix_millis(now - 30 * 60_000 + ms);
        SprintSession::start_at(
            group(),
            ParticipantId::new("alice").unwrap(),
            SprintDuration::HalfHour,
            start,
        )
    }

    #[test]
    fn delay_for_past_instant_is_zero() {
        let past = Timestamp::from_unix_millis(0);
        assert_eq!(delay_until(&past), Duration::ZERO);
    }

    #[tokio::test]
    async fn due_trigger_ends_sprint_and_posts_summary() {
        let f = spawn_worker();
        let session = session_ending_in(50);
        f.store.put(&group(), &session, TTL).await.unwrap();

        f.scheduler.schedule(ExpiryTrigger::for_session(&session));
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(f.store.session_count().await, 0);
        let texts = f.sender.texts_for(&group());
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("📊 Sprint Summary (30 minutes):"));

        f.shutdown_tx.send(true).unwrap();
        f.handle.await.unwrap();
    }

    #[tokio::test]
    async fn stale_trigger_leaves_restarted_sprint_running() {
        let f = spawn_worker();
        let old = session_ending_in(20);
        let restarted = session_ending_in(30 * 60_000);
        f.store.put(&group(), &restarted, TTL).await.unwrap();

        f.scheduler.schedule(ExpiryTrigger::for_session(&old));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(f.store.session_count().await, 1);
        assert!(f.sender.sent().is_empty());

        f.shutdown_tx.send(true).unwrap();
        f.handle.await.unwrap();
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let f = spawn_worker();
        f.scheduler
            .schedule(ExpiryTrigger::for_session(&session_ending_in(60 * 60_000)));

        f.shutdown_tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(1), f.handle).await;
        assert!(result.is_ok());
    }
}
