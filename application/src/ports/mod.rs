//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod document_analyzer;
pub mod session_event_logger;
pub mod session_store;
pub mod suggestion_provider;
