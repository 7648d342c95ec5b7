//! In-memory session store with idle expiry and an LRU capacity cap.

use async_trait::async_trait;
use medassist_application::{SessionHandle, SessionParams, SessionSlot, SessionStore};
use medassist_domain::{Session, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Process-local [`SessionStore`].
///
/// The map lock is held only to look up, insert or remove handles; session
/// state itself is guarded by each slot's own mutex.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new(params: &SessionParams) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: params.idle_timeout,
            max_sessions: params.max_sessions.max(1),
        }
    }

    /// Pick the least recently used session among those not currently locked.
    ///
    /// A locked slot is serving a request right now, so it is not a
    /// candidate for eviction.
    fn least_recently_used(sessions: &HashMap<SessionId, SessionHandle>) -> Option<SessionId> {
        sessions
            .iter()
            .filter_map(|(id, handle)| {
                handle
                    .try_lock()
                    .ok()
                    .map(|slot| (id, slot.last_activity()))
            })
            .min_by_key(|(_, last_activity)| *last_activity)
            .map(|(id, _)| id.clone())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> (SessionHandle, Option<SessionId>) {
        let id = session.id().clone();
        let handle = Arc::new(Mutex::new(SessionSlot::new(session)));

        let mut sessions = self.sessions.write().await;
        let mut evicted = None;
        if sessions.len() >= self.max_sessions
            && let Some(lru) = Self::least_recently_used(&sessions)
            && let Some(old) = sessions.remove(&lru)
        {
            old.lock().await.evict();
            evicted = Some(lru);
        }
        sessions.insert(id, handle.clone());

        (handle, evicted)
    }

    async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        let handle = self.sessions.read().await.get(id).cloned()?;

        let mut slot = handle.lock().await;
        if slot.is_evicted() {
            return None;
        }
        if slot.is_idle(self.idle_timeout) {
            debug!("Session {} expired on access", id);
            slot.evict();
            drop(slot);
            self.sessions.write().await.remove(id);
            return None;
        }
        drop(slot);

        Some(handle)
    }

    async fn evict_idle(&self, idle_timeout: Duration) -> Vec<SessionId> {
        let handles: Vec<(SessionId, SessionHandle)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, handle)| (id.clone(), handle.clone()))
            .collect();

        let mut expired = Vec::new();
        for (id, handle) in handles {
            let mut slot = handle.lock().await;
            if !slot.is_evicted() && slot.is_idle(idle_timeout) {
                slot.evict();
                expired.push(id);
            }
        }

        if !expired.is_empty() {
            let mut sessions = self.sessions.write().await;
            for id in &expired {
                sessions.remove(id);
            }
        }
        expired
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medassist_domain::{Condition, KnowledgeBase};

    fn knowledge() -> KnowledgeBase {
        KnowledgeBase::new(vec![Condition::new("flu", ["fever"])]).unwrap()
    }

    fn session(id: &str) -> Session {
        Session::new(SessionId::new(id), &knowledge())
    }

    fn store(max_sessions: usize) -> InMemorySessionStore {
        InMemorySessionStore::new(
            &SessionParams::default()
                .with_idle_timeout(Duration::from_secs(3600))
                .with_max_sessions(max_sessions),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = store(10);
        let (handle, evicted) = store.insert(session("a")).await;
        assert!(evicted.is_none());

        let fetched = store.get(&SessionId::new("a")).await.unwrap();
        assert!(Arc::ptr_eq(&handle, &fetched));
        assert!(store.get(&SessionId::new("b")).await.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_evict_idle_flags_and_removes() {
        let store = store(10);
        let (handle, _) = store.insert(session("a")).await;
        store.insert(session("b")).await;

        let mut expired = store.evict_idle(Duration::ZERO).await;
        expired.sort_by(|x, y| x.as_str().cmp(y.as_str()));
        assert_eq!(expired, vec![SessionId::new("a"), SessionId::new("b")]);
        assert_eq!(store.len().await, 0);

        // A handle obtained before eviction sees the flag
        assert!(handle.lock().await.is_evicted());
        assert!(store.get(&SessionId::new("a")).await.is_none());
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_recent_sessions() {
        let store = store(10);
        store.insert(session("a")).await;
        assert!(store.evict_idle(Duration::from_secs(3600)).await.is_empty());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_expires_idle_session() {
        let store =
            InMemorySessionStore::new(&SessionParams::default().with_idle_timeout(Duration::ZERO));
        let (handle, _) = store.insert(session("a")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(store.get(&SessionId::new("a")).await.is_none());
        assert!(handle.lock().await.is_evicted());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_lookup_and_sweep_agree_on_timeout_boundary() {
        let store =
            InMemorySessionStore::new(&SessionParams::default().with_idle_timeout(Duration::ZERO));
        store.insert(session("a")).await;
        store.insert(session("b")).await;

        // Idle for exactly zero already meets a zero timeout on both paths
        assert!(store.get(&SessionId::new("a")).await.is_none());
        assert_eq!(store.evict_idle(Duration::ZERO).await, vec![SessionId::new("b")]);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let store = store(2);
        let (first, _) = store.insert(session("a")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let (second, _) = store.insert(session("b")).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        // Touch "a" so "b" becomes the least recently used
        first.lock().await.touch();

        let (_, evicted) = store.insert(session("c")).await;
        assert_eq!(evicted, Some(SessionId::new("b")));
        assert!(second.lock().await.is_evicted());
        assert_eq!(store.len().await, 2);
        assert!(store.get(&SessionId::new("a")).await.is_some());
        assert!(store.get(&SessionId::new("c")).await.is_some());
    }

    #[tokio::test]
    async fn test_capacity_skips_busy_sessions() {
        let store = store(1);
        let (busy, _) = store.insert(session("a")).await;
        let _guard = busy.lock().await;

        let (_, evicted) = store.insert(session("b")).await;
        assert!(evicted.is_none());
        assert_eq!(store.len().await, 2);
    }
}
