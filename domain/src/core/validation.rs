//! Configuration issues reported by `validate()` methods.
//!
//! Validation collects every issue instead of stopping at the first, so a
//! misconfigured deployment can be fixed in one pass.
//!
//! # Examples
//!
//! ```
//! use medassist_domain::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issues = vec![ConfigIssue::warning(
//!     ConfigIssueCode::SweepSlowerThanTimeout,
//!     "sweeper runs less often than sessions expire",
//! )];
//! assert!(!ConfigIssue::has_errors(&issues));
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the service cannot start with this configuration.
    Error,
    /// Non-fatal: the service starts but may not behave as expected.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `server.bind` is not a socket address.
    InvalidBindAddress,
    /// `server.max_upload_bytes` is zero.
    ZeroUploadLimit,
    /// `[engine]` values violate the scoring policy rules.
    InvalidScoringPolicy,
    /// `engine.confidence_threshold` is below `engine.min_confidence`:
    /// sessions can end "confident" with a low-confidence disclaimer.
    ThresholdBelowFloor,
    /// `sessions.idle_timeout_secs` or `sessions.sweep_interval_secs` is zero.
    ZeroSessionTiming,
    /// `sessions.max_sessions` is zero.
    ZeroSessionCap,
    /// `sessions.sweep_interval_secs` exceeds `sessions.idle_timeout_secs`.
    SweepSlowerThanTimeout,
    /// `knowledge.dataset` names a file that does not exist.
    DatasetNotFound,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
