//! Background task that evicts idle sessions.

use medassist_application::{
    NoSessionEventLogger, SessionEvent, SessionEventLogger, SessionParams, SessionStore,
};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically evicts sessions idle past the configured timeout.
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    params: SessionParams,
    event_logger: Arc<dyn SessionEventLogger>,
}

impl SessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, params: SessionParams) -> Self {
        Self {
            store,
            params,
            event_logger: Arc::new(NoSessionEventLogger),
        }
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn SessionEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Run one eviction pass, returning how many sessions expired.
    pub async fn sweep_once(&self) -> usize {
        let expired = self.store.evict_idle(self.params.idle_timeout).await;
        for id in &expired {
            self.event_logger.log(SessionEvent::new(
                "session_expired",
                json!({ "session_id": id.as_str(), "cause": "idle" }),
            ));
        }
        if expired.is_empty() {
            debug!("Session sweep: nothing to evict");
        } else {
            info!("Session sweep: evicted {} idle sessions", expired.len());
        }
        expired.len()
    }

    /// Spawn the sweep loop; it stops when `cancel` fires.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.params.sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; nothing can be idle yet.
            ticker.tick().await;
            info!(
                "Session sweeper started ({}s interval, {}s idle timeout)",
                self.params.sweep_interval.as_secs(),
                self.params.idle_timeout.as_secs()
            );

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        info!("Session sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.sweep_once().await;
                    }
                }
            }
        })
    }
}
