//! Run Diagnosis use case.
//!
//! Drives a guided diagnosis: create a session, apply answers one at a time,
//! and read session snapshots. Scoring and question choice belong to the
//! [`DiagnosisEngine`]; this use case owns storage, locking and logging.

use crate::ports::session_event_logger::{
    NoSessionEventLogger, SessionEvent, SessionEventLogger,
};
use crate::ports::session_store::SessionStore;
use medassist_domain::{
    Answer, DiagnosisEngine, DiagnosisStep, DomainError, Session, SessionId,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a diagnosis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosisError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A session id together with the engine's verdict for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosisProgress {
    pub session_id: SessionId,
    pub step: DiagnosisStep,
}

/// Use case for guided diagnosis sessions.
///
/// 1. [`start`](Self::start): new session, first question
/// 2. [`answer`](Self::answer): apply an answer under the session's lock
/// 3. [`session`](Self::session): snapshot for inspection
#[derive(Clone)]
pub struct RunDiagnosisUseCase {
    engine: Arc<DiagnosisEngine>,
    store: Arc<dyn SessionStore>,
    event_logger: Arc<dyn SessionEventLogger>,
}

impl RunDiagnosisUseCase {
    pub fn new(engine: Arc<DiagnosisEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            engine,
            store,
            event_logger: Arc::new(NoSessionEventLogger),
        }
    }

    /// Create with a session event logger.
    pub fn with_event_logger(mut self, logger: Arc<dyn SessionEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub fn engine(&self) -> &DiagnosisEngine {
        &self.engine
    }

    /// Number of live sessions
    pub async fn active_sessions(&self) -> usize {
        self.store.len().await
    }

    /// Start a new session and return its first question.
    pub async fn start(&self) -> DiagnosisProgress {
        let (session, step) = self.engine.start(SessionId::generate());
        let session_id = session.id().clone();

        let (_, evicted) = self.store.insert(session).await;
        if let Some(evicted) = evicted {
            warn!("Session store at capacity, evicted least recently used session {}", evicted);
            self.event_logger.log(SessionEvent::new(
                "session_expired",
                json!({ "session_id": evicted.as_str(), "cause": "capacity" }),
            ));
        }

        info!("Started diagnosis session {}", session_id);
        self.event_logger.log(SessionEvent::new(
            "session_started",
            json!({
                "session_id": session_id.as_str(),
                "first_question": step.question().map(|q| q.symptom()),
            }),
        ));
        self.log_completion(&session_id, &step);

        DiagnosisProgress { session_id, step }
    }

    /// Apply `answer` (raw client text) to the session's active question.
    ///
    /// The answer is validated before the session is touched; a completed
    /// session rejects further answers without changing.
    pub async fn answer(
        &self,
        session_id: &SessionId,
        answer: &str,
    ) -> Result<DiagnosisProgress, DiagnosisError> {
        let answer: Answer = answer.parse().inspect_err(|e| {
            warn!("Rejected answer for session {}: {}", session_id, e);
        })?;

        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| DiagnosisError::SessionNotFound(session_id.to_string()))?;

        let mut slot = handle.lock().await;
        if slot.is_evicted() {
            return Err(DiagnosisError::SessionNotFound(session_id.to_string()));
        }

        let symptom = slot
            .session()
            .active_question()
            .map(|q| q.symptom().to_string());
        let step = self
            .engine
            .answer(slot.session_mut(), answer)
            .inspect_err(|e| warn!("Rejected answer for session {}: {}", session_id, e))?;
        let questions_asked = slot.session().questions_asked();
        drop(slot);

        debug!(
            "Session {}: {} -> {} (confidence {:.3})",
            session_id,
            symptom.as_deref().unwrap_or("?"),
            answer,
            step.confidence()
        );
        self.event_logger.log(SessionEvent::new(
            "answer_recorded",
            json!({
                "session_id": session_id.as_str(),
                "symptom": symptom,
                "answer": answer.as_str(),
                "questions_asked": questions_asked,
                "confidence": step.confidence(),
            }),
        ));
        self.log_completion(session_id, &step);

        Ok(DiagnosisProgress {
            session_id: session_id.clone(),
            step,
        })
    }

    /// Snapshot of a live session.
    pub async fn session(&self, session_id: &SessionId) -> Result<Session, DiagnosisError> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| DiagnosisError::SessionNotFound(session_id.to_string()))?;

        let mut slot = handle.lock().await;
        if slot.is_evicted() {
            return Err(DiagnosisError::SessionNotFound(session_id.to_string()));
        }
        slot.touch();
        Ok(slot.session().clone())
    }

    fn log_completion(&self, session_id: &SessionId, step: &DiagnosisStep) {
        let Some(result) = step.result() else {
            return;
        };
        info!(
            "Session {} complete: {} ({:.0}%, {} questions, {})",
            session_id,
            result.condition_name,
            result.confidence * 100.0,
            result.questions_asked,
            result.reason
        );
        self.event_logger.log(SessionEvent::new(
            "diagnosis_completed",
            json!({
                "session_id": session_id.as_str(),
                "condition": result.condition_name,
                "confidence": result.confidence,
                "low_confidence": result.low_confidence,
                "questions_asked": result.questions_asked,
                "reason": result.reason,
            }),
        ));
    }
}
