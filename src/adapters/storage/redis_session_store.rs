//! Redis-backed session store for production deployments.
//!
//! Each group's session is a JSON string under `sprint:<group_id>`, written
//! with `SET ... EX` so every update pushes the safety expiry forward.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::foundation::GroupId;
use crate::domain::sprint::SprintSession;
use crate::ports::{session_key, SessionStore, SessionStoreError};

/// Redis-backed sprint session store.
///
/// Shared by every process instance, so a sprint started on one instance can
/// be joined or ended through another.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    /// Create a store over an established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open a client for `url` and establish a multiplexed connection.
    pub async fn connect(url: &str) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url)
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(Self::new(conn))
    }
}

/// Decode a stored value, treating corrupt records as absent.
fn decode_session(group_id: &GroupId, raw: &str) -> Option<SprintSession> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(
                group_id = %group_id,
                error = %e,
                "Discarding unreadable sprint session record"
            );
            None
        }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, group_id: &GroupId) -> Result<Option<SprintSession>, SessionStoreError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(session_key(group_id))
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::Unavailable(e.to_string()))?;

        Ok(raw.and_then(|raw| decode_session(group_id, &raw)))
    }

    async fn put(
        &self,
        group_id: &GroupId,
        session: &SprintSession,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;
        let mut conn = self.conn.clone();

        // Redis rejects EX 0, so sub-second TTLs round up.
        redis::cmd("SET")
            .arg(session_key(group_id))
            .arg(payload)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, group_id: &GroupId) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(session_key(group_id))
            .await
            .map_err(|e: redis::RedisError| SessionStoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore").finish_non_exhaustive()
    }
}
