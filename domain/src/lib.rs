//! Domain layer for medassist
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Knowledge base
//!
//! A read-only catalog of [`Condition`]s, each with the symptoms that are
//! asked about and a recommendation bundle (medicines, exercises, diet,
//! doctor specialization).
//!
//! ## Diagnosis
//!
//! - **Session**: one patient's question/answer history and running scores
//! - **Engine**: applies answers, decides when to stop, picks the next question
//! - **Finalizer**: ranks conditions and attaches recommendations

pub mod condition;
pub mod core;
pub mod diagnosis;

// Re-export commonly used types
pub use condition::{
    Condition, ConditionId, KnowledgeBase, Recommendations, builtin_conditions, normalize_symptom,
};
pub use core::{
    error::DomainError,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use diagnosis::{
    answer::Answer,
    engine::{Candidate, DiagnosisEngine, normalize},
    finalizer::{finalize, rank},
    policy::{AnswerWeights, ScoringPolicy},
    question::Question,
    result::{
        DiagnosisRecommendations, DiagnosisResult, DiagnosisStep, LOW_CONFIDENCE_DISCLAIMER,
        RankedCondition, STANDARD_DISCLAIMER, TerminationReason,
    },
    session::{AnsweredQuestion, ConditionScore, Session, SessionId},
};
