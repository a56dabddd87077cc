//! Store access shared by the sprint handlers.
//!
//! Reads fail open: a store that cannot be reached looks like a group with
//! no sprint. Writes that fail are reported to the user as
//! `StoreUnavailable` and nothing else is changed.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::GroupId;
use crate::domain::sprint::{SprintError, SprintSession};
use crate::ports::SessionStore;

/// Store handle plus the safety TTL applied on every write.
#[derive(Clone)]
pub struct SessionAccess {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionAccess {
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// The group's running sprint, if any.
    pub async fn load(&self, group_id: &GroupId) -> Option<SprintSession> {
        match self.store.get(group_id).await {
            Ok(session) => session.filter(SprintSession::is_active),
            Err(e) => {
                tracing::warn!(
                    group_id = %group_id,
                    error = %e,
                    "Session store read failed; treating group as idle"
                );
                None
            }
        }
    }

    /// The group's running sprint, or `NoActiveSession`.
    pub async fn load_active(&self, group_id: &GroupId) -> Result<SprintSession, SprintError> {
        self.load(group_id).await.ok_or(SprintError::NoActiveSession)
    }

    /// Upsert the session and push its expiry forward.
    pub async fn save(&self, session: &SprintSession) -> Result<(), SprintError> {
        self.store
            .put(session.group_id(), session, self.ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    group_id = %session.group_id(),
                    error = %e,
                    "Failed to persist sprint session"
                );
                SprintError::StoreUnavailable
            })
    }

    /// Delete a finished session.
    ///
    /// If the delete fails the finished record is written over the active
    /// one instead, which `load` already treats as no sprint. Failures are
    /// logged only; the record still expires with its TTL.
    pub async fn remove(&self, finished: &SprintSession) {
        let group_id = finished.group_id();
        let Err(e) = self.store.delete(group_id).await else {
            return;
        };
        tracing::warn!(
            group_id = %group_id,
            error = %e,
            "Failed to delete finished sprint session; marking it inactive"
        );

        if let Err(e) = self.store.put(group_id, finished, self.ttl).await {
            tracing::error!(
                group_id = %group_id,
                error = %e,
                "Failed to mark finished sprint session inactive"
            );
        }
    }
}

impl std::fmt::Debug for SessionAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAccess")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
