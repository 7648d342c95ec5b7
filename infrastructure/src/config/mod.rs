//! Configuration file loading for medassist
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MEDASSIST_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./medassist.toml` or `./.medassist.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/medassist/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnswerWeights, FileConfig, FileEngineConfig, FileKnowledgeConfig,
    FileLoggingConfig, FileServerConfig, FileSessionsConfig,
};
pub use loader::ConfigLoader;
