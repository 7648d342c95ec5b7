//! Knowledge base configuration from TOML (`[knowledge]` section)

use medassist_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw knowledge configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeConfig {
    /// JSON or TOML condition dataset; the built-in catalog when unset
    pub dataset: Option<PathBuf>,
}

impl FileKnowledgeConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        match &self.dataset {
            Some(path) if !path.exists() => vec![ConfigIssue::error(
                ConfigIssueCode::DatasetNotFound,
                format!("knowledge.dataset: {} does not exist", path.display()),
            )],
            _ => Vec::new(),
        }
    }
}
