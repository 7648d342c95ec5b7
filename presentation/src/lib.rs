//! Presentation layer for medassist
//!
//! This crate contains CLI definitions, the HTTP API, console output
//! formatting and the interactive diagnosis REPL.

pub mod cli;
pub mod diagnose;
pub mod http;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use diagnose::DiagnosisRepl;
pub use http::{ApiError, AppState, router, serve};
pub use output::console::ConsoleFormatter;
