//! Strongly-typed identifier value objects.
//!
//! Chat platforms hand us opaque strings (WhatsApp uses phone numbers and
//! group JIDs), so identifiers wrap a non-empty `String` rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identifier of a chat group. One sprint session may exist per group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a new GroupId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("group_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a chat user taking part in (or starting) a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Creates a new ParticipantId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("participant_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Chat mention markup for this participant.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_id_accepts_non_empty_string() {
        let id = GroupId::new("120363025@g.us").unwrap();
        assert_eq!(id.as_str(), "120363025@g.us");
    }

    #[test]
    fn group_id_rejects_blank_string() {
        match GroupId::new("  ") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "group_id"),
            other => panic!("Expected EmptyField error, got {:?}", other),
        }
    }

    #[test]
    fn participant_id_rejects_empty_string() {
        assert!(ParticipantId::new("").is_err());
    }

    #[test]
    fn participant_id_mention_wraps_id() {
        let id = ParticipantId::new("15551234567").unwrap();
        assert_eq!(id.mention(), "<@15551234567>");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ParticipantId::new("alice").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");

        let back: GroupId = serde_json::from_str("\"group-1\"").unwrap();
        assert_eq!(back.as_str(), "group-1");
    }
}
