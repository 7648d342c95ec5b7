//! Session lifetime configuration from TOML (`[sessions]` section)

use medassist_application::SessionParams;
use medassist_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw sessions configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionsConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
    pub max_sessions: usize,
}

impl Default for FileSessionsConfig {
    fn default() -> Self {
        let params = SessionParams::default();
        Self {
            idle_timeout_secs: params.idle_timeout.as_secs(),
            sweep_interval_secs: params.sweep_interval.as_secs(),
            max_sessions: params.max_sessions,
        }
    }
}

impl FileSessionsConfig {
    pub fn to_params(&self) -> SessionParams {
        SessionParams::default()
            .with_idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .with_sweep_interval(Duration::from_secs(self.sweep_interval_secs))
            .with_max_sessions(self.max_sessions)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.idle_timeout_secs == 0 || self.sweep_interval_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroSessionTiming,
                "sessions.idle_timeout_secs and sessions.sweep_interval_secs must be greater than 0",
            ));
        } else if self.sweep_interval_secs > self.idle_timeout_secs {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SweepSlowerThanTimeout,
                format!(
                    "sessions.sweep_interval_secs ({}) exceeds sessions.idle_timeout_secs ({}): \
                     idle sessions will linger past their timeout",
                    self.sweep_interval_secs, self.idle_timeout_secs
                ),
            ));
        }
        if self.max_sessions == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroSessionCap,
                "sessions.max_sessions must be greater than 0",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params() {
        let config = FileSessionsConfig {
            idle_timeout_secs: 90,
            sweep_interval_secs: 15,
            max_sessions: 4,
        };
        let params = config.to_params();
        assert_eq!(params.idle_timeout, Duration::from_secs(90));
        assert_eq!(params.sweep_interval, Duration::from_secs(15));
        assert_eq!(params.max_sessions, 4);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_values_are_errors() {
        let config = FileSessionsConfig {
            idle_timeout_secs: 0,
            sweep_interval_secs: 60,
            max_sessions: 0,
        };
        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![ConfigIssueCode::ZeroSessionTiming, ConfigIssueCode::ZeroSessionCap]
        );
    }

    #[test]
    fn test_slow_sweep_warns() {
        let config = FileSessionsConfig {
            idle_timeout_secs: 10,
            sweep_interval_secs: 60,
            ..FileSessionsConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::SweepSlowerThanTimeout);
    }
}
