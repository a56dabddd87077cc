//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a process-local map with per-entry expiry.
//! Useful for testing and single-process development; it does not survive
//! restarts and is not shared between instances.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::foundation::GroupId;
use crate::domain::sprint::SprintSession;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
struct StoredSession {
    session: SprintSession,
    expires_at: Instant,
}

/// In-memory storage for sprint sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<GroupId, StoredSession>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions that have not expired
    pub async fn session_count(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| s.expires_at > now)
            .count()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, group_id: &GroupId) -> Result<Option<SprintSession>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(group_id)
            .filter(|stored| stored.expires_at > Instant::now())
            .map(|stored| stored.session.clone()))
    }

    async fn put(
        &self,
        group_id: &GroupId,
        session: &SprintSession,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            group_id.clone(),
            StoredSession {
                session: session.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, group_id: &GroupId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(group_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ParticipantId;
    use crate::domain::sprint::SprintDuration;

    const TTL: Duration = Duration::from_secs(3 * 60 * 60);

    fn group() -> GroupId {
        GroupId::new("group-1").unwrap()
    }

    fn test_session() -> SprintSession {
        SprintSession::start(
            group(),
            ParticipantId::new("starter").unwrap(),
            SprintDuration::HalfHour,
        )
    }

    #[tokio::test]
    async fn put_then_get_returns_session() {
        let store = InMemorySessionStore::new();
        let session = test_session();

        store.put(&group(), &session, TTL).await.unwrap();

        assert_eq!(store.get(&group()).await.unwrap(), Some(session));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn get_missing_group_is_none() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(&group()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_overwrites_previous_version() {
        let store = InMemorySessionStore::new();
        let mut session = test_session();
        store.put(&group(), &session, TTL).await.unwrap();

        session.join(ParticipantId::new("bob").unwrap()).unwrap();
        store.put(&group(), &session, TTL).await.unwrap();

        let loaded = store.get(&group()).await.unwrap().unwrap();
        assert_eq!(loaded.participants().len(), 2);
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let store = InMemorySessionStore::new();
        store
            .put(&group(), &test_session(), Duration::from_millis(10))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(store.get(&group()).await.unwrap(), None);
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn delete_removes_and_is_idempotent() {
        let store = InMemorySessionStore::new();
        store.put(&group(), &test_session(), TTL).await.unwrap();

        store.delete(&group()).await.unwrap();
        store.delete(&group()).await.unwrap();

        assert_eq!(store.get(&group()).await.unwrap(), None);
    }
}
