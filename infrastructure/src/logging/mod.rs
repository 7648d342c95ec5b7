//! Structured session event logging.
//!
//! Provides [`JsonlSessionLogger`], a JSONL file writer that implements
//! the [`SessionEventLogger`](medassist_application::SessionEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSessionLogger;
