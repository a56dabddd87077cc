//! Sprint-specific error types.
//!
//! Every variant is recoverable: the engine turns it into a chat reply and
//! leaves the stored session untouched. The `Display` text is that reply.

use thiserror::Error;

/// Reasons a sprint command is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SprintError {
    /// `/sprint` while a session is already running in the group.
    #[error("❌ A sprint session is already active in this group!")]
    AlreadyActive,

    /// `/sprint` with a length outside the allowed set.
    #[error("❌ Invalid duration. Please choose 30, 60, 90, or 120 minutes.")]
    InvalidDuration,

    /// `/words`, `/end` or `/leave` while the group has no session.
    #[error("❌ No active sprint session in this group.")]
    NoActiveSession,

    /// `/join` while the group has no session.
    #[error("❌ No active sprint session in this group. Start one with /sprint")]
    NoSessionToJoin,

    /// `/join` by someone already taking part.
    #[error("❌ You are already in this sprint session!")]
    AlreadyJoined,

    /// `/leave` by someone who never joined.
    #[error("❌ You are not part of this sprint session.")]
    NotParticipant,

    /// `/words` by someone who never joined.
    #[error("❌ You are not part of this sprint session. Use /join to join.")]
    NotJoined,

    /// `/words` with a missing, negative or non-numeric count.
    #[error("❌ Please provide a valid word count (positive number).")]
    InvalidWordCount,

    /// `/end` by anyone other than the starter.
    #[error("❌ Only the person who started the sprint can end it.")]
    NotStarter,

    /// The session could not be written back.
    #[error("⚠️ Sprint tracking is temporarily unavailable. Please try again shortly.")]
    StoreUnavailable,
}

impl SprintError {
    /// Short machine-readable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SprintError::AlreadyActive => "already_active",
            SprintError::InvalidDuration => "invalid_duration",
            SprintError::NoActiveSession => "no_active_session",
            SprintError::NoSessionToJoin => "no_session_to_join",
            SprintError::AlreadyJoined => "already_joined",
            SprintError::NotParticipant => "not_participant",
            SprintError::NotJoined => "not_joined",
            SprintError::InvalidWordCount => "invalid_word_count",
            SprintError::NotStarter => "not_starter",
            SprintError::StoreUnavailable => "store_unavailable",
        }
    }
}
