//! Outbound message port.
//!
//! Delivery is best-effort. Callers log failures and move on; a failed send
//! never rolls back a committed session change.

use async_trait::async_trait;

use crate::domain::foundation::GroupId;

/// Errors that can occur while delivering a chat message.
#[derive(Debug, thiserror::Error)]
pub enum MessageSendError {
    /// The request never reached the platform.
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform answered with a non-success status.
    #[error("rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Port for sending plain text to a chat group.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(&self, group_id: &GroupId, text: &str) -> Result<(), MessageSendError>;
}
