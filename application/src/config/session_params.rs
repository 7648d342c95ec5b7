//! Session lifetime parameters.
//!
//! [`SessionParams`] groups the limits that govern how long diagnosis
//! sessions live and how many may exist at once. These are application-layer
//! concerns, not domain policy: the engine never sees them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session store control parameters.
///
/// | Field | Effect |
/// |-------|--------|
/// | `idle_timeout` | sessions untouched this long are evicted |
/// | `sweep_interval` | how often the background sweeper runs |
/// | `max_sessions` | creating beyond this evicts the least recently used session |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    pub idle_timeout: Duration,
    pub sweep_interval: Duration,
    pub max_sessions: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
            max_sessions: 10_000,
        }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max;
        self
    }
}
