//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain/application types
//! at startup.

mod engine;
mod knowledge;
mod logging;
mod server;
mod sessions;

pub use engine::{FileAnswerWeights, FileEngineConfig};
pub use knowledge::FileKnowledgeConfig;
pub use logging::FileLoggingConfig;
pub use server::FileServerConfig;
pub use sessions::FileSessionsConfig;

use medassist_domain::{ConfigIssue, Severity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when the configuration has at least one `Error`-severity issue
#[derive(Debug, Error)]
#[error("invalid configuration:\n  {}", list_messages(.issues))]
pub struct ConfigValidationError {
    pub issues: Vec<ConfigIssue>,
}

fn list_messages(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Scoring thresholds and answer weights
    pub engine: FileEngineConfig,
    /// Session lifetime settings
    pub sessions: FileSessionsConfig,
    /// Condition dataset
    pub knowledge: FileKnowledgeConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.server.validate());
        issues.extend(self.engine.validate());
        issues.extend(self.sessions.validate());
        issues.extend(self.knowledge.validate());
        issues
    }

    /// Validate and fail on any error, returning the remaining warnings.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .validate()
            .into_iter()
            .partition(|i| i.severity == Severity::Error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError { issues: errors })
        }
    }
}
