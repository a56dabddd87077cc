//! Recording message sender for testing.
//!
//! Captures every message instead of delivering it, and can be switched to
//! fail so callers' error handling can be exercised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::GroupId;
use crate::ports::{MessageSendError, MessageSender};

/// A message captured by [`RecordingSender`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub group_id: GroupId,
    pub text: String,
}

/// In-memory `MessageSender` that records what would have been sent.
#[derive(Debug, Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail (messages are still recorded).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Texts sent to one group, in order.
    pub fn texts_for(&self, group_id: &GroupId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|m| &m.group_id == group_id)
            .map(|m| m.text)
            .collect()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_text(&self, group_id: &GroupId, text: &str) -> Result<(), MessageSendError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentMessage {
                group_id: group_id.clone(),
                text: text.to_string(),
            });
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(MessageSendError::Transport("simulated failure".to_string()));
        }
        Ok(())
    }
}
