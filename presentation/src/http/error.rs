//! API error type and its HTTP mapping.
//!
//! | Error | Status |
//! |-------|--------|
//! | `SessionNotFound` | 404 |
//! | `SessionCompleted` | 409 |
//! | `InvalidAnswer` | 422 |
//! | `InvalidRequest` | 400 |
//! | `PayloadTooLarge` | 413 |
//! | `UnsupportedDocument` | 415 |
//!
//! Bodies are always `{"error": <kind>, "detail": <message>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medassist_application::{AnalyzeDocumentError, DiagnosisError, DocumentError, LookupError};
use medassist_domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    SessionNotFound(String),

    #[error("{0}")]
    SessionCompleted(String),

    #[error("{0}")]
    InvalidAnswer(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnsupportedDocument(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'static str,
    detail: &'a str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SessionCompleted(_) => StatusCode::CONFLICT,
            ApiError::InvalidAnswer(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedDocument(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::SessionNotFound(_) => "session_not_found",
            ApiError::SessionCompleted(_) => "session_completed",
            ApiError::InvalidAnswer(_) => "invalid_answer",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::UnsupportedDocument(_) => "unsupported_document",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        let detail = self.to_string();
        let body = Json(ErrorBody {
            error: self.kind(),
            detail: &detail,
        });
        (status, body).into_response()
    }
}

impl From<DiagnosisError> for ApiError {
    fn from(err: DiagnosisError) -> Self {
        let detail = err.to_string();
        match err {
            DiagnosisError::SessionNotFound(_) => ApiError::SessionNotFound(detail),
            DiagnosisError::Domain(DomainError::SessionCompleted(_)) => {
                ApiError::SessionCompleted(detail)
            }
            DiagnosisError::Domain(DomainError::InvalidAnswer(_)) => ApiError::InvalidAnswer(detail),
            DiagnosisError::Domain(_) => ApiError::Internal(detail),
        }
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl From<AnalyzeDocumentError> for ApiError {
    fn from(err: AnalyzeDocumentError) -> Self {
        let detail = err.to_string();
        match err {
            AnalyzeDocumentError::EmptyDocument => ApiError::InvalidRequest(detail),
            AnalyzeDocumentError::TooLarge { .. } => ApiError::PayloadTooLarge(detail),
            AnalyzeDocumentError::Document(DocumentError::Unsupported { .. }) => {
                ApiError::UnsupportedDocument(detail)
            }
            AnalyzeDocumentError::Document(DocumentError::NoText) => {
                ApiError::InvalidRequest(detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_errors_map_to_statuses() {
        let not_found: ApiError = DiagnosisError::SessionNotFound("x".to_string()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let completed: ApiError =
            DiagnosisError::Domain(DomainError::SessionCompleted("x".to_string())).into();
        assert_eq!(completed.status(), StatusCode::CONFLICT);

        let invalid: ApiError =
            DiagnosisError::Domain(DomainError::InvalidAnswer("perhaps".to_string())).into();
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.kind(), "invalid_answer");
        assert!(invalid.to_string().contains("perhaps"));
    }

    #[test]
    fn test_document_errors_map_to_statuses() {
        let large: ApiError = AnalyzeDocumentError::TooLarge { size: 9, limit: 1 }.into();
        assert_eq!(large.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let unsupported: ApiError = AnalyzeDocumentError::Document(DocumentError::Unsupported {
            filename: "a.png".to_string(),
            reason: "image".to_string(),
        })
        .into();
        assert_eq!(unsupported.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let empty: ApiError = AnalyzeDocumentError::EmptyDocument.into();
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    }
}
