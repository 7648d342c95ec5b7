//! Question selection & scoring engine
//!
//! # Algorithm
//!
//! ```text
//! answer ──▶ apply signed weight to every condition with the symptom
//!              │
//!              ▼
//!        normalize: raw / Σ(positive raw), clamped to [0, 1]
//!              │
//!              ▼
//!        terminate?  question limit
//!                    leader ≥ threshold          (after min_questions)
//!                    no unasked symptom left
//!                    nothing left discriminates  (after min_questions)
//!              │ no
//!              ▼
//!        next question = argmax H(p) over unasked symptoms of viable
//!        conditions, p = share of viable mass holding the symptom
//! ```
//!
//! A condition is *viable* while its raw score is positive.

use super::answer::Answer;
use super::finalizer::{finalize, rank};
use super::policy::ScoringPolicy;
use super::question::Question;
use super::result::{DiagnosisStep, TerminationReason};
use super::session::{Session, SessionId};
use crate::condition::KnowledgeBase;
use crate::core::error::DomainError;
use std::sync::Arc;

/// Scores closer than this are treated as equal.
const EPSILON: f64 = 1e-9;

/// Normalize raw scores into confidences.
///
/// Each positive score is divided by the sum of positive scores; everything
/// else (and everything, when no score is positive) maps to 0.
pub fn normalize(raw: &[f64]) -> Vec<f64> {
    let total: f64 = raw.iter().filter(|r| **r > 0.0).sum();
    raw.iter()
        .map(|&r| {
            if total > 0.0 && r > 0.0 {
                (r / total).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
        .collect()
}

/// Binary entropy in bits
fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
}

/// A symptom that could be asked next
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub symptom: &'a str,
    /// Expected information gain (bits)
    pub gain: f64,
    /// Number of viable conditions having the symptom
    pub holders: usize,
    /// Whether the answer could separate the viable conditions
    pub discriminates: bool,
}

/// The diagnosis engine: stateless over sessions, shared across requests.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    knowledge: Arc<KnowledgeBase>,
    policy: ScoringPolicy,
}

impl DiagnosisEngine {
    /// Create an engine, rejecting policies its guarantees don't hold under
    pub fn new(knowledge: Arc<KnowledgeBase>, policy: ScoringPolicy) -> Result<Self, DomainError> {
        policy.validate()?;
        Ok(Self { knowledge, policy })
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Create a session at the priors and pick its first question
    pub fn start(&self, id: SessionId) -> (Session, DiagnosisStep) {
        let mut session = Session::new(id, &self.knowledge);
        let step = self.advance(&mut session);
        (session, step)
    }

    /// Apply an answer to the session's active question and advance.
    ///
    /// A finished session is left untouched and reported as
    /// [`DomainError::SessionCompleted`].
    pub fn answer(&self, session: &mut Session, answer: Answer) -> Result<DiagnosisStep, DomainError> {
        let question = match session.active_question() {
            Some(q) if !session.is_complete() => q.clone(),
            _ => return Err(DomainError::SessionCompleted(session.id().to_string())),
        };

        let delta = self.policy.weights.weight(answer);
        if delta != 0.0 {
            for (position, condition) in self.knowledge.conditions().iter().enumerate() {
                if condition.has_symptom(question.symptom()) {
                    session.add_to_score(position, delta);
                }
            }
        }
        session.record_answer(question, answer);

        Ok(self.advance(session))
    }

    /// Unasked symptoms of viable conditions, in catalog order
    pub fn candidates<'a>(&'a self, session: &Session, raw: &[f64], confidence: &[f64]) -> Vec<Candidate<'a>> {
        let conditions = self.knowledge.conditions();
        let viable_mass: f64 = raw
            .iter()
            .zip(confidence)
            .filter(|(r, _)| **r > 0.0)
            .map(|(_, c)| c)
            .sum();

        let mut candidates = Vec::new();
        for symptom in self.knowledge.symptoms() {
            if session.has_asked(symptom) {
                continue;
            }

            let mut holders = 0;
            let mut mass = 0.0;
            for (position, condition) in conditions.iter().enumerate() {
                if raw[position] > 0.0 && condition.has_symptom(symptom) {
                    holders += 1;
                    mass += confidence[position];
                }
            }
            if holders == 0 {
                continue;
            }

            let p = if viable_mass > 0.0 {
                (mass / viable_mass).clamp(0.0, 1.0)
            } else {
                0.0
            };
            candidates.push(Candidate {
                symptom: symptom.as_str(),
                gain: binary_entropy(p),
                holders,
                discriminates: p > EPSILON && p < 1.0 - EPSILON,
            });
        }
        candidates
    }

    /// Pick the most informative candidate.
    ///
    /// Highest gain wins; equal gains go to the symptom held by more viable
    /// conditions, then to the earlier one in catalog order.
    pub fn select<'c, 'a>(candidates: &'c [Candidate<'a>]) -> Option<&'c Candidate<'a>> {
        let mut best: Option<&Candidate> = None;
        for candidate in candidates {
            best = match best {
                None => Some(candidate),
                Some(current) => {
                    let better_gain = candidate.gain > current.gain + EPSILON;
                    let same_gain = (candidate.gain - current.gain).abs() <= EPSILON;
                    if better_gain || (same_gain && candidate.holders > current.holders) {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        best
    }

    fn advance(&self, session: &mut Session) -> DiagnosisStep {
        let raw = session.raw_scores();
        let confidence = normalize(&raw);
        let asked = session.questions_asked();
        let leader = confidence.iter().copied().fold(0.0, f64::max);
        let past_minimum = asked >= self.policy.min_questions;

        if asked >= self.policy.max_questions {
            return self.finish(session, &raw, &confidence, TerminationReason::QuestionLimit);
        }
        if past_minimum && leader >= self.policy.confidence_threshold {
            return self.finish(session, &raw, &confidence, TerminationReason::ConfidenceReached);
        }

        let candidates = self.candidates(session, &raw, &confidence);
        let Some(next) = Self::select(&candidates) else {
            return self.finish(session, &raw, &confidence, TerminationReason::QuestionsExhausted);
        };
        if past_minimum && !candidates.iter().any(|c| c.discriminates) {
            return self.finish(
                session,
                &raw,
                &confidence,
                TerminationReason::NoDiscriminatingQuestion,
            );
        }

        let question = Question::about(next.symptom);
        session.set_active_question(Some(question.clone()));
        DiagnosisStep::Continue {
            question,
            confidence: leader,
            leading: rank(&self.knowledge, &raw, &confidence, self.policy.ranking_size),
        }
    }

    fn finish(
        &self,
        session: &mut Session,
        raw: &[f64],
        confidence: &[f64],
        reason: TerminationReason,
    ) -> DiagnosisStep {
        let result = finalize(
            &self.knowledge,
            &self.policy,
            raw,
            confidence,
            session.questions_asked(),
            reason,
        );
        session.complete(result.clone());
        DiagnosisStep::Complete(result)
    }
}
