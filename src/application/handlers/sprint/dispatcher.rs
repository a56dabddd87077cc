//! ChatDispatcher - runs the engine and posts its replies.

use std::sync::Arc;

use crate::domain::foundation::GroupId;
use crate::ports::{ExpiryTrigger, MessageSender};

use super::{InboundMessage, SprintEngine};

/// Glue between transports and the engine.
///
/// Replies are sent one after another in the order produced. Delivery
/// failures are logged and dropped; state has already been committed.
#[derive(Clone)]
pub struct ChatDispatcher {
    engine: Arc<SprintEngine>,
    sender: Arc<dyn MessageSender>,
}

impl ChatDispatcher {
    pub fn new(engine: Arc<SprintEngine>, sender: Arc<dyn MessageSender>) -> Self {
        Self { engine, sender }
    }

    /// Handles one inbound message end to end.
    pub async fn dispatch(&self, message: &InboundMessage) {
        let replies = self.engine.handle(message).await;
        self.deliver(&message.group_id, replies).await;
    }

    /// Runs a fired expiry trigger end to end.
    pub async fn expire(&self, trigger: &ExpiryTrigger) {
        let replies = self.engine.expire(trigger).await;
        self.deliver(&trigger.group_id, replies).await;
    }

    async fn deliver(&self, group_id: &GroupId, replies: Vec<String>) {
        for reply in replies {
            if let Err(e) = self.sender.send_text(group_id, &reply).await {
                tracing::warn!(
                    group_id = %group_id,
                    error = %e,
                    "Failed to deliver sprint reply"
                );
            }
        }
    }
}
