//! Scoring policy: thresholds and answer weights for the engine.

use super::answer::Answer;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Signed score change applied per answer to every condition that has the
/// answered symptom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerWeights {
    pub yes: f64,
    pub maybe: f64,
    pub unsure: f64,
    pub no: f64,
}

impl Default for AnswerWeights {
    fn default() -> Self {
        Self {
            yes: 1.0,
            maybe: 0.4,
            unsure: 0.0,
            no: -1.0,
        }
    }
}

impl AnswerWeights {
    pub fn weight(&self, answer: Answer) -> f64 {
        match answer {
            Answer::Yes => self.yes,
            Answer::No => self.no,
            Answer::Maybe => self.maybe,
            Answer::Unsure => self.unsure,
        }
    }
}

/// Engine control parameters.
///
/// | Field | Ends a session when |
/// |-------|---------------------|
/// | `confidence_threshold` | the leader's confidence reaches it |
/// | `max_questions` | that many answers were given |
/// | `min_questions` | (guard) nothing but the limit or exhaustion ends a session earlier |
///
/// `min_confidence` does not end sessions; results below it get the
/// low-confidence disclaimer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub confidence_threshold: f64,
    pub min_confidence: f64,
    pub max_questions: usize,
    pub min_questions: usize,
    /// How many conditions to report in rankings
    pub ranking_size: usize,
    pub weights: AnswerWeights,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.75,
            min_confidence: 0.4,
            max_questions: 10,
            min_questions: 2,
            ranking_size: 3,
            weights: AnswerWeights::default(),
        }
    }
}

impl ScoringPolicy {
    // ==================== Builder Methods ====================

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_min_confidence(mut self, floor: f64) -> Self {
        self.min_confidence = floor;
        self
    }

    pub fn with_max_questions(mut self, max: usize) -> Self {
        self.max_questions = max;
        self
    }

    pub fn with_min_questions(mut self, min: usize) -> Self {
        self.min_questions = min;
        self
    }

    pub fn with_weights(mut self, weights: AnswerWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Check the policy is one the engine's guarantees hold under.
    ///
    /// Weights must be ordered `yes >= maybe >= unsure == 0 >= no` with
    /// `yes > 0`, so a "yes" can never lower a matching condition's score.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |msg: String| Err(DomainError::InvalidPolicy(msg));
        let unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);

        if !unit(self.confidence_threshold) || self.confidence_threshold == 0.0 {
            return invalid(format!(
                "confidence_threshold must be in (0, 1], got {}",
                self.confidence_threshold
            ));
        }
        if !unit(self.min_confidence) {
            return invalid(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            ));
        }
        if self.max_questions == 0 {
            return invalid("max_questions must be at least 1".to_string());
        }
        if self.min_questions > self.max_questions {
            return invalid(format!(
                "min_questions ({}) exceeds max_questions ({})",
                self.min_questions, self.max_questions
            ));
        }
        if self.ranking_size == 0 {
            return invalid("ranking_size must be at least 1".to_string());
        }

        let w = &self.weights;
        if ![w.yes, w.maybe, w.unsure, w.no].iter().all(|v| v.is_finite()) {
            return invalid("answer weights must be finite".to_string());
        }
        if !(w.yes > 0.0 && w.yes >= w.maybe && w.maybe >= 0.0 && w.unsure == 0.0 && w.no <= 0.0)
        {
            return invalid(format!(
                "answer weights must satisfy yes > 0, yes >= maybe >= 0, unsure == 0, no <= 0 \
                 (got yes={}, maybe={}, unsure={}, no={})",
                w.yes, w.maybe, w.unsure, w.no
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let policy = ScoringPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.max_questions, 10);
        assert_eq!(policy.confidence_threshold, 0.75);
    }

    #[test]
    fn test_weight_lookup() {
        let w = AnswerWeights::default();
        assert!(w.weight(Answer::Yes) > w.weight(Answer::Maybe));
        assert!(w.weight(Answer::Maybe) > w.weight(Answer::Unsure));
        assert!(w.weight(Answer::Unsure) > w.weight(Answer::No));
        assert_eq!(w.weight(Answer::Unsure), 0.0);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        assert!(ScoringPolicy::default().with_confidence_threshold(1.5).validate().is_err());
        assert!(ScoringPolicy::default().with_confidence_threshold(0.0).validate().is_err());
        assert!(ScoringPolicy::default().with_min_confidence(-0.1).validate().is_err());
    }

    #[test]
    fn test_rejects_inconsistent_question_bounds() {
        assert!(ScoringPolicy::default().with_max_questions(0).validate().is_err());
        let policy = ScoringPolicy::default().with_max_questions(3).with_min_questions(4);
        assert!(matches!(policy.validate(), Err(DomainError::InvalidPolicy(_))));
    }

    #[test]
    fn test_rejects_negative_yes_weight() {
        let weights = AnswerWeights {
            yes: -1.0,
            ..AnswerWeights::default()
        };
        assert!(ScoringPolicy::default().with_weights(weights).validate().is_err());

        let weights = AnswerWeights {
            no: 0.5,
            ..AnswerWeights::default()
        };
        assert!(ScoringPolicy::default().with_weights(weights).validate().is_err());
    }
}
