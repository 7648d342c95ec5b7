//! Diagnosis session entity

use super::answer::Answer;
use super::question::Question;
use super::result::DiagnosisResult;
use crate::condition::{ConditionId, KnowledgeBase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque session token (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random (UUID v4) id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One question/answer exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub answer: Answer,
    pub answered_at: DateTime<Utc>,
}

/// Running (unnormalized) score for one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionScore {
    pub condition_id: ConditionId,
    pub raw: f64,
}

/// A diagnosis session (Entity)
///
/// Scores are kept in knowledge-base catalog order, so position `i` in
/// [`Session::scores`] is the condition at position `i` in
/// [`KnowledgeBase::conditions`]. Only the engine mutates a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    history: Vec<AnsweredQuestion>,
    scores: Vec<ConditionScore>,
    active_question: Option<Question>,
    result: Option<DiagnosisResult>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session with every condition at its prior weight
    pub fn new(id: SessionId, knowledge: &KnowledgeBase) -> Self {
        let now = Utc::now();
        Self {
            id,
            history: Vec::new(),
            scores: knowledge
                .conditions()
                .iter()
                .map(|c| ConditionScore {
                    condition_id: c.id().clone(),
                    raw: c.prior(),
                })
                .collect(),
            active_question: None,
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn history(&self) -> &[AnsweredQuestion] {
        &self.history
    }

    pub fn scores(&self) -> &[ConditionScore] {
        &self.scores
    }

    pub fn raw_scores(&self) -> Vec<f64> {
        self.scores.iter().map(|s| s.raw).collect()
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.active_question.as_ref()
    }

    pub fn result(&self) -> Option<&DiagnosisResult> {
        self.result.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    pub fn questions_asked(&self) -> usize {
        self.history.len()
    }

    pub fn has_asked(&self, symptom: &str) -> bool {
        self.history.iter().any(|h| h.question.symptom() == symptom)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ==================== Engine mutations ====================

    pub(crate) fn set_active_question(&mut self, question: Option<Question>) {
        self.active_question = question;
        self.updated_at = Utc::now();
    }

    pub(crate) fn record_answer(&mut self, question: Question, answer: Answer) {
        let now = Utc::now();
        self.history.push(AnsweredQuestion {
            question,
            answer,
            answered_at: now,
        });
        self.active_question = None;
        self.updated_at = now;
    }

    pub(crate) fn add_to_score(&mut self, position: usize, delta: f64) {
        if let Some(score) = self.scores.get_mut(position) {
            score.raw += delta;
        }
    }

    pub(crate) fn complete(&mut self, result: DiagnosisResult) {
        self.active_question = None;
        self.result = Some(result);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
        assert_eq!(SessionId::generate().as_str().len(), 36);
    }

    #[test]
    fn test_new_session_starts_at_priors() {
        let kb = KnowledgeBase::new(vec![
            Condition::new("Flu", ["fever"]).with_prior(0.7),
            Condition::new("Cold", ["cough"]).with_prior(0.2),
        ])
        .unwrap();
        let session = Session::new(SessionId::new("s1"), &kb);

        assert_eq!(session.raw_scores(), vec![0.7, 0.2]);
        assert_eq!(session.scores()[1].condition_id.as_str(), "cold");
        assert!(!session.is_complete());
        assert_eq!(session.questions_asked(), 0);
        assert!(session.active_question().is_none());
    }

    #[test]
    fn test_record_answer_clears_active_question() {
        let kb = KnowledgeBase::new(vec![Condition::new("Flu", ["fever"])]).unwrap();
        let mut session = Session::new(SessionId::new("s1"), &kb);
        session.set_active_question(Some(Question::about("fever")));

        session.record_answer(Question::about("fever"), Answer::Yes);

        assert!(session.active_question().is_none());
        assert!(session.has_asked("fever"));
        assert!(!session.has_asked("cough"));
        assert_eq!(session.history()[0].answer, Answer::Yes);
    }
}
