//! Application layer for medassist
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::{
    document_analyzer::{DocumentAnalysis, DocumentAnalyzer, DocumentError},
    session_event_logger::{NoSessionEventLogger, SessionEvent, SessionEventLogger},
    session_store::{SessionHandle, SessionSlot, SessionStore},
    suggestion_provider::{SuggestionKind, SuggestionProvider},
};
pub use use_cases::analyze_document::{
    AnalyzeDocumentError, AnalyzeDocumentUseCase, DEFAULT_MAX_DOCUMENT_BYTES, DocumentFindings,
    DocumentRecommendations, DocumentReport,
};
pub use use_cases::lookup_recommendations::{
    ExerciseLookup, LookupError, LookupRecommendationsUseCase, MedicineLookup,
};
pub use use_cases::run_diagnosis::{DiagnosisError, DiagnosisProgress, RunDiagnosisUseCase};
