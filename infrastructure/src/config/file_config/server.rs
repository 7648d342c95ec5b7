//! HTTP server configuration from TOML (`[server]` section)

use medassist_application::DEFAULT_MAX_DOCUMENT_BYTES;
use medassist_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Raw server configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address, e.g. "127.0.0.1:8001"
    pub bind: String,
    /// Largest accepted document upload in bytes
    pub max_upload_bytes: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8001".to_string(),
            max_upload_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl FileServerConfig {
    /// Parse `bind` into a socket address.
    ///
    /// Returns `None` plus an issue when the address is malformed.
    pub fn parse_bind(&self) -> (Option<SocketAddr>, Vec<ConfigIssue>) {
        match self.bind.parse::<SocketAddr>() {
            Ok(addr) => (Some(addr), Vec::new()),
            Err(e) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidBindAddress,
                    format!("server.bind: '{}' is not a socket address ({})", self.bind, e),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_bind().1;
        if self.max_upload_bytes == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroUploadLimit,
                "server.max_upload_bytes must be greater than 0",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_parses() {
        let (addr, issues) = FileServerConfig::default().parse_bind();
        assert_eq!(addr.unwrap().port(), 8001);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_bad_bind_is_error() {
        let config = FileServerConfig {
            bind: "localhost".to_string(),
            ..FileServerConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::InvalidBindAddress);
    }
}
