//! Port for diagnosis session storage.
//!
//! Each session lives in its own [`SessionSlot`] behind an async mutex, so
//! the read-modify-write of an answer is one critical section per session
//! and different sessions never contend beyond the store's short map lock.
//!
//! Eviction (idle sweep or capacity) flags the slot under its lock. A caller
//! that obtained the handle before eviction must check
//! [`SessionSlot::is_evicted`] after locking and treat the session as gone.

use async_trait::async_trait;
use medassist_domain::{Session, SessionId};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// A stored session plus its bookkeeping.
#[derive(Debug)]
pub struct SessionSlot {
    session: Session,
    last_activity: Instant,
    evicted: bool,
}

impl SessionSlot {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            last_activity: Instant::now(),
            evicted: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access; counts as activity.
    pub fn session_mut(&mut self) -> &mut Session {
        self.touch();
        &mut self.session
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Expired once idle for at least `timeout`; shared by lookup and sweep.
    pub fn is_idle(&self, timeout: Duration) -> bool {
        self.idle_for() >= timeout
    }

    pub fn evict(&mut self) {
        self.evicted = true;
    }

    pub fn is_evicted(&self) -> bool {
        self.evicted
    }
}

/// Shared handle to one session's slot
pub type SessionHandle = Arc<Mutex<SessionSlot>>;

/// Storage for live diagnosis sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session and return its handle.
    ///
    /// When the store is at capacity the least recently used session is
    /// evicted first; its id is returned alongside the handle.
    async fn insert(&self, session: Session) -> (SessionHandle, Option<SessionId>);

    /// Look up a live session. Expired or evicted sessions are `None`.
    async fn get(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Evict every session idle for at least `idle_timeout`, returning
    /// the evicted ids.
    async fn evict_idle(&self, idle_timeout: Duration) -> Vec<SessionId>;

    /// Number of live sessions.
    async fn len(&self) -> usize;
}
