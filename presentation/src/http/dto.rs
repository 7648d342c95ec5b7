//! Request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use medassist_application::DiagnosisProgress;
use medassist_domain::{
    Condition, DiagnosisRecommendations, DiagnosisResult, DiagnosisStep, KnowledgeBase,
    RankedCondition, Session, normalize,
};
use serde::{Deserialize, Serialize};

// ==================== Requests ====================

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MedicineRequest {
    pub disease_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseRequest {
    pub condition: String,
}

// ==================== Responses ====================

/// Reply to `start-diagnosis` and `answer-question`.
///
/// A continuing session carries `question`; a finished one carries
/// `final_diagnosis` and `recommendations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisResponse {
    pub session_id: String,
    pub is_complete: bool,
    pub confidence_score: f64,
    pub question: Option<String>,
    /// Symptom the question asks about
    pub symptom: Option<String>,
    /// Names of the leading conditions, best first
    pub potential_conditions: Vec<String>,
    pub ranking: Vec<RankedCondition>,
    pub final_diagnosis: Option<String>,
    pub recommendations: Option<DiagnosisRecommendations>,
    pub low_confidence: bool,
}

impl DiagnosisResponse {
    pub fn from_progress(progress: &DiagnosisProgress) -> Self {
        let session_id = progress.session_id.to_string();
        match &progress.step {
            DiagnosisStep::Continue {
                question,
                confidence,
                leading,
            } => Self {
                session_id,
                is_complete: false,
                confidence_score: *confidence,
                question: Some(question.prompt().to_string()),
                symptom: Some(question.symptom().to_string()),
                potential_conditions: leading.iter().map(|r| r.name.clone()).collect(),
                ranking: leading.clone(),
                final_diagnosis: None,
                recommendations: None,
                low_confidence: false,
            },
            DiagnosisStep::Complete(result) => Self {
                session_id,
                is_complete: true,
                confidence_score: result.confidence,
                question: None,
                symptom: None,
                potential_conditions: result.ranking.iter().map(|r| r.name.clone()).collect(),
                ranking: result.ranking.clone(),
                final_diagnosis: Some(final_diagnosis_text(result)),
                recommendations: Some(result.recommendations.clone()),
                low_confidence: result.low_confidence,
            },
        }
    }
}

/// One-line verdict shown to the patient
pub fn final_diagnosis_text(result: &DiagnosisResult) -> String {
    if result.low_confidence {
        format!(
            "Your answers do not clearly match one condition. The closest match is {} \
             ({:.0}% confidence).",
            result.condition_name,
            result.confidence * 100.0
        )
    } else {
        format!(
            "Based on your answers, the most likely condition is {} ({:.0}% confidence).",
            result.condition_name,
            result.confidence * 100.0
        )
    }
}

/// Catalog entry for `GET /conditions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionDto {
    pub id: String,
    pub name: String,
    pub symptoms: Vec<String>,
    pub medicines: Vec<String>,
    pub exercises: Vec<String>,
    pub diet: Vec<String>,
    pub doctor_specialization: String,
    pub description: String,
}

impl From<&Condition> for ConditionDto {
    fn from(condition: &Condition) -> Self {
        let bundle = condition.recommendations();
        Self {
            id: condition.id().to_string(),
            name: condition.name().to_string(),
            symptoms: condition.symptoms().to_vec(),
            medicines: bundle.medicines.clone(),
            exercises: bundle.exercises.clone(),
            diet: bundle.diet.clone(),
            doctor_specialization: bundle.doctor_specialization.clone(),
            description: bundle.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub symptom: String,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub condition_id: String,
    pub name: String,
    pub raw_score: f64,
    pub confidence: f64,
}

/// Snapshot for `GET /session/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub session_id: String,
    pub is_complete: bool,
    pub questions_asked: usize,
    pub current_question: Option<String>,
    pub confidence_score: f64,
    pub history: Vec<HistoryEntry>,
    pub scores: Vec<ScoreEntry>,
    pub result: Option<DiagnosisResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionDto {
    pub fn from_session(session: &Session, knowledge: &KnowledgeBase) -> Self {
        let raw = session.raw_scores();
        let confidence = normalize(&raw);
        let scores = session
            .scores()
            .iter()
            .zip(&confidence)
            .map(|(score, &confidence)| ScoreEntry {
                condition_id: score.condition_id.to_string(),
                name: knowledge
                    .get(&score.condition_id)
                    .map(|c| c.name().to_string())
                    .unwrap_or_default(),
                raw_score: score.raw,
                confidence,
            })
            .collect();

        Self {
            session_id: session.id().to_string(),
            is_complete: session.is_complete(),
            questions_asked: session.questions_asked(),
            current_question: session.active_question().map(|q| q.prompt().to_string()),
            confidence_score: session
                .result()
                .map(|r| r.confidence)
                .unwrap_or_else(|| confidence.iter().copied().fold(0.0, f64::max)),
            history: session
                .history()
                .iter()
                .map(|h| HistoryEntry {
                    question: h.question.prompt().to_string(),
                    symptom: h.question.symptom().to_string(),
                    answer: h.answer.to_string(),
                    answered_at: h.answered_at,
                })
                .collect(),
            scores,
            result: session.result().cloned(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub conditions: usize,
    pub active_sessions: usize,
}
