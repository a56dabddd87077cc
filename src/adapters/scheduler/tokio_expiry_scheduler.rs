//! Channel-backed `ExpiryScheduler`.

use tokio::sync::mpsc;

use crate::ports::{ExpiryScheduler, ExpiryTrigger};

/// Queues triggers for an `ExpiryWorker`.
#[derive(Debug, Clone)]
pub struct TokioExpiryScheduler {
    tx: mpsc::UnboundedSender<ExpiryTrigger>,
}

impl TokioExpiryScheduler {
    /// Scheduler plus the receiving end to hand to `ExpiryWorker::new`.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ExpiryTrigger>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ExpiryScheduler for TokioExpiryScheduler {
    fn schedule(&self, trigger: ExpiryTrigger) {
        let group_id = trigger.group_id.clone();
        if self.tx.send(trigger).is_err() {
            // Store TTL still cleans the record up eventually.
            tracing::warn!(
                group_id = %group_id,
                "Expiry worker is not running; sprint will not auto-end"
            );
        }
    }
}
