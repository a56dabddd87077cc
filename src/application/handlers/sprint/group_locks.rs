//! Optional per-group serialization point.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::GroupId;

type LockMap = DashMap<GroupId, Arc<Mutex<()>>>;

/// One async mutex per group, created on first use and dropped again once
/// nobody holds or waits for it.
///
/// Holding the guard for the whole read-modify-write of a command makes
/// commands for the same group run one at a time. Different groups never
/// contend.
#[derive(Debug, Clone, Default)]
pub struct GroupLocks {
    locks: Arc<LockMap>,
}

impl GroupLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to the group.
    pub async fn acquire(&self, group_id: &GroupId) -> GroupGuard {
        let lock = self.locks.entry(group_id.clone()).or_default().clone();
        let guard = lock.lock_owned().await;
        GroupGuard {
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
            group_id: group_id.clone(),
        }
    }

    /// Number of groups currently locked or waited on.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Exclusive access to one group. Releasing the last interest in a group
/// removes its entry.
#[derive(Debug)]
pub struct GroupGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
    group_id: GroupId,
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters hold a clone, so a count of one means only the map is left.
        self.locks
            .remove_if(&self.group_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn group(id: &str) -> GroupId {
        GroupId::new(id).unwrap()
    }

    #[tokio::test]
    async fn same_group_waits_for_holder() {
        let locks = GroupLocks::new();
        let guard = locks.acquire(&group("g")).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&group("g")).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_groups_do_not_contend() {
        let locks = GroupLocks::new();
        let _a = locks.acquire(&group("a")).await;

        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&group("b"))).await;

        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn released_group_is_evicted() {
        let locks = GroupLocks::new();

        for id in ["a", "b", "c"] {
            let _guard = locks.acquire(&group(id)).await;
            assert_eq!(locks.len(), 1);
        }

        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn entry_survives_while_someone_waits() {
        let locks = GroupLocks::new();
        let guard = locks.acquire(&group("g")).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&group("g")).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert_eq!(locks.len(), 1);

        waiter.await.unwrap();
        assert!(locks.is_empty());
    }
}
