//! Route handlers for the `/api` surface.

use super::dto::{
    AnswerRequest, ConditionDto, DiagnosisResponse, ExerciseRequest, HealthResponse,
    MedicineRequest, SessionDto,
};
use super::error::ApiError;
use super::server::AppState;
use axum::{
    Json,
    extract::{Multipart, Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use medassist_application::{DocumentReport, ExerciseLookup, MedicineLookup};
use medassist_domain::SessionId;
use std::sync::Arc;
use tracing::debug;

type SharedState = State<Arc<AppState>>;

pub async fn start_diagnosis(State(state): SharedState) -> Json<DiagnosisResponse> {
    let progress = state.diagnosis.start().await;
    Json(DiagnosisResponse::from_progress(&progress))
}

pub async fn answer_question(
    State(state): SharedState,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<DiagnosisResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let session_id = SessionId::new(request.session_id);
    let progress = state.diagnosis.answer(&session_id, &request.answer).await?;
    Ok(Json(DiagnosisResponse::from_progress(&progress)))
}

pub async fn get_session(
    State(state): SharedState,
    Path(session_id): Path<String>,
) -> Result<Json<SessionDto>, ApiError> {
    let session = state
        .diagnosis
        .session(&SessionId::new(session_id))
        .await?;
    Ok(Json(SessionDto::from_session(
        &session,
        state.diagnosis.engine().knowledge(),
    )))
}

pub async fn list_conditions(State(state): SharedState) -> Json<Vec<ConditionDto>> {
    Json(
        state
            .lookups
            .conditions()
            .iter()
            .map(ConditionDto::from)
            .collect(),
    )
}

pub async fn medicine_suggestions(
    State(state): SharedState,
    body: Result<Json<MedicineRequest>, JsonRejection>,
) -> Result<Json<MedicineLookup>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    Ok(Json(state.lookups.medicines(&request.disease_name).await?))
}

pub async fn exercise_suggestions(
    State(state): SharedState,
    body: Result<Json<ExerciseRequest>, JsonRejection>,
) -> Result<Json<ExerciseLookup>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    Ok(Json(state.lookups.exercises(&request.condition).await?))
}

/// Reads the first multipart field named `file`.
pub async fn upload_document(
    State(state): SharedState,
    mut multipart: Multipart,
) -> Result<Json<DocumentReport>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("document").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        debug!("Received upload '{}' ({} bytes)", filename, bytes.len());

        let report = state.documents.execute(&filename, &bytes).await?;
        return Ok(Json(report));
    }
    Err(ApiError::InvalidRequest(
        "multipart field 'file' is missing".to_string(),
    ))
}

pub async fn health(State(state): SharedState) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        conditions: state.lookups.conditions().len(),
        active_sessions: state.diagnosis.active_sessions().await,
    })
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::InvalidRequest(err.body_text())
    }
}
