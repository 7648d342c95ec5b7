//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Knowledge base contains no conditions")]
    EmptyKnowledgeBase,

    #[error("Duplicate condition id: {0}")]
    DuplicateCondition(String),

    #[error("Invalid condition '{name}': {reason}")]
    InvalidCondition { name: String, reason: String },

    #[error("Invalid scoring policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid answer '{0}' (expected yes, no, maybe or unsure)")]
    InvalidAnswer(String),

    #[error("Unknown condition: {0}")]
    UnknownCondition(String),

    #[error("Session {0} is already complete")]
    SessionCompleted(String),
}

impl DomainError {
    /// Check if this error is a startup configuration problem rather than a
    /// per-request failure
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyKnowledgeBase
                | DomainError::DuplicateCondition(_)
                | DomainError::InvalidCondition { .. }
                | DomainError::InvalidPolicy(_)
        )
    }
}
