//! Transport-neutral inbound chat event.

use crate::domain::foundation::{GroupId, ParticipantId};

/// One chat message as delivered by the transport.
///
/// Deliveries are at-least-once and may arrive concurrently for the same
/// group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub group_id: GroupId,
    pub sender_id: ParticipantId,
    pub text: String,
}

impl InboundMessage {
    pub fn new(group_id: GroupId, sender_id: ParticipantId, text: impl Into<String>) -> Self {
        Self {
            group_id,
            sender_id,
            text: text.into(),
        }
    }
}
