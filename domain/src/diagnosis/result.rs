//! Diagnosis outcome types

use super::question::Question;
use crate::condition::ConditionId;
use serde::{Deserialize, Serialize};

/// Disclaimer attached to every diagnosis and recommendation
pub const STANDARD_DISCLAIMER: &str = "This is an AI-generated assessment, not a medical diagnosis. \
     Please consult a qualified healthcare professional for proper medical advice and treatment.";

/// Disclaimer used when the leading condition is below the confidence floor
pub const LOW_CONFIDENCE_DISCLAIMER: &str = "Low confidence: your answers do not clearly point to a \
     single condition. Consult a healthcare professional before acting on this result. \
     This is an AI-generated assessment, not a medical diagnosis.";

/// Why a session stopped asking questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The leading condition reached the confidence threshold
    ConfidenceReached,
    /// The question limit was hit
    QuestionLimit,
    /// Every symptom of every viable condition was already asked
    QuestionsExhausted,
    /// Remaining questions cannot separate the viable conditions
    NoDiscriminatingQuestion,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::ConfidenceReached => write!(f, "confidence reached"),
            TerminationReason::QuestionLimit => write!(f, "question limit"),
            TerminationReason::QuestionsExhausted => write!(f, "questions exhausted"),
            TerminationReason::NoDiscriminatingQuestion => write!(f, "no discriminating question"),
        }
    }
}

/// A condition with its normalized confidence, as reported in rankings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCondition {
    pub condition_id: ConditionId,
    pub name: String,
    pub confidence: f64,
}

/// Recommendation bundle of a finished diagnosis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRecommendations {
    pub medicines: Vec<String>,
    pub exercises: Vec<String>,
    pub diet: Vec<String>,
    pub doctor_specialization: String,
    pub description: String,
    pub disclaimer: String,
}

/// Immutable snapshot of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub condition_id: ConditionId,
    pub condition_name: String,
    /// Normalized confidence of the reported condition, in [0, 1]
    pub confidence: f64,
    /// True when `confidence` is below the policy's floor
    pub low_confidence: bool,
    pub recommendations: DiagnosisRecommendations,
    /// Top conditions, best first
    pub ranking: Vec<RankedCondition>,
    pub questions_asked: usize,
    pub reason: TerminationReason,
}

/// What the engine returns after starting a session or applying an answer
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosisStep {
    /// Ask another question
    Continue {
        question: Question,
        /// Leader's normalized confidence
        confidence: f64,
        /// Current top conditions, best first
        leading: Vec<RankedCondition>,
    },
    /// The session is finished
    Complete(DiagnosisResult),
}

impl DiagnosisStep {
    pub fn is_complete(&self) -> bool {
        matches!(self, DiagnosisStep::Complete(_))
    }

    pub fn confidence(&self) -> f64 {
        match self {
            DiagnosisStep::Continue { confidence, .. } => *confidence,
            DiagnosisStep::Complete(result) => result.confidence,
        }
    }

    pub fn question(&self) -> Option<&Question> {
        match self {
            DiagnosisStep::Continue { question, .. } => Some(question),
            DiagnosisStep::Complete(_) => None,
        }
    }

    pub fn result(&self) -> Option<&DiagnosisResult> {
        match self {
            DiagnosisStep::Continue { .. } => None,
            DiagnosisStep::Complete(result) => Some(result),
        }
    }
}
