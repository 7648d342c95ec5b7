//! Infrastructure layer for medassist
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod analysis;
pub mod config;
pub mod knowledge;
pub mod logging;
pub mod sessions;

// Re-export commonly used types
pub use analysis::{KeywordDocumentAnalyzer, StaticSuggestionProvider};
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEngineConfig, FileKnowledgeConfig,
    FileLoggingConfig, FileServerConfig, FileSessionsConfig,
};
pub use knowledge::{DatasetError, load_dataset, load_knowledge};
pub use logging::JsonlSessionLogger;
pub use sessions::{InMemorySessionStore, SessionSweeper};
