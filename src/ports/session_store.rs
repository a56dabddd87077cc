//! Session Store Port - Interface for persisting sprint sessions.
//!
//! One record per group with an absolute expiry. The store offers plain
//! get/put/delete; there is no compare-and-swap, so a get followed by a put
//! is not atomic and concurrent writers overwrite each other (last write
//! wins). Callers that need per-group ordering must serialize themselves.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::GroupId;
use crate::domain::sprint::SprintSession;

/// Key prefix used by backends that share a keyspace.
pub const SESSION_KEY_PREFIX: &str = "sprint:";

/// Returns the backend key for a group's session.
pub fn session_key(group_id: &GroupId) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, group_id)
}

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),
}

/// Port for reading and writing the per-group sprint session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the group's session.
    ///
    /// Returns `Ok(None)` when no record exists, the record has expired, or
    /// the stored value cannot be decoded. Only backend failures are errors.
    async fn get(&self, group_id: &GroupId) -> Result<Option<SprintSession>, SessionStoreError>;

    /// Upsert the group's session, resetting its expiry to `ttl` from now.
    async fn put(
        &self,
        group_id: &GroupId,
        session: &SprintSession,
        ttl: Duration,
    ) -> Result<(), SessionStoreError>;

    /// Remove the group's session. Succeeds if nothing is stored.
    async fn delete(&self, group_id: &GroupId) -> Result<(), SessionStoreError>;
}
