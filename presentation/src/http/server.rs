//! Router assembly and the HTTP server loop.

use super::routes;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use medassist_application::{
    AnalyzeDocumentUseCase, LookupRecommendationsUseCase, RunDiagnosisUseCase,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Room for multipart boundaries and headers on top of the document limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Use cases shared by every handler.
pub struct AppState {
    pub diagnosis: RunDiagnosisUseCase,
    pub lookups: LookupRecommendationsUseCase,
    pub documents: AnalyzeDocumentUseCase,
}

/// Build the application router with all routes under `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.documents.max_bytes() + MULTIPART_OVERHEAD;

    let api = Router::new()
        .route("/start-diagnosis", post(routes::start_diagnosis))
        .route("/answer-question", post(routes::answer_question))
        .route("/session/:session_id", get(routes::get_session))
        .route("/conditions", get(routes::list_conditions))
        .route("/get-medicine-suggestions", post(routes::medicine_suggestions))
        .route("/get-exercise-suggestions", post(routes::exercise_suggestions))
        .route("/upload-medical-document", post(routes::upload_document))
        .route("/health", get(routes::health));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown` is cancelled, then drain in-flight requests.
pub async fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use medassist_application::{
        DocumentAnalysis, DocumentAnalyzer, DocumentError, SessionHandle, SessionSlot,
        SessionStore, SuggestionKind, SuggestionProvider,
    };
    use medassist_domain::{
        Condition, DiagnosisEngine, KnowledgeBase, ScoringPolicy, Session, SessionId,
        builtin_conditions,
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::time::Duration;
    use tower::ServiceExt;

    // ==================== Mocks ====================

    #[derive(Default)]
    struct MapStore {
        sessions: tokio::sync::Mutex<HashMap<SessionId, SessionHandle>>,
    }

    #[async_trait]
    impl SessionStore for MapStore {
        async fn insert(&self, session: Session) -> (SessionHandle, Option<SessionId>) {
            let id = session.id().clone();
            let handle = Arc::new(tokio::sync::Mutex::new(SessionSlot::new(session)));
            self.sessions.lock().await.insert(id, handle.clone());
            (handle, None)
        }

        async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
            self.sessions.lock().await.get(id).cloned()
        }

        async fn evict_idle(&self, _idle_timeout: Duration) -> Vec<SessionId> {
            Vec::new()
        }

        async fn len(&self) -> usize {
            self.sessions.lock().await.len()
        }
    }

    struct CannedSuggestions;

    #[async_trait]
    impl SuggestionProvider for CannedSuggestions {
        async fn suggest(&self, kind: SuggestionKind, query: &str) -> String {
            format!("general {} advice for {}", kind, query)
        }
    }

    /// Accepts UTF-8 text and matches "asthma" literally
    struct TextAnalyzer;

    #[async_trait]
    impl DocumentAnalyzer for TextAnalyzer {
        async fn analyze(
            &self,
            filename: &str,
            bytes: &[u8],
        ) -> Result<DocumentAnalysis, DocumentError> {
            let text = std::str::from_utf8(bytes).map_err(|_| DocumentError::Unsupported {
                filename: filename.to_string(),
                reason: "not UTF-8 text".to_string(),
            })?;
            let matched = text.to_lowercase().contains("asthma");
            Ok(DocumentAnalysis {
                extracted_text: text.to_string(),
                summary: "reviewed".to_string(),
                matched_condition: matched.then(|| "Asthma".to_string()),
                matched_terms: Vec::new(),
            })
        }
    }

    fn app_with(conditions: Vec<Condition>, max_bytes: usize) -> Router {
        let knowledge = Arc::new(KnowledgeBase::new(conditions).unwrap());
        let engine =
            Arc::new(DiagnosisEngine::new(knowledge.clone(), ScoringPolicy::default()).unwrap());
        let state = AppState {
            diagnosis: RunDiagnosisUseCase::new(engine, Arc::new(MapStore::default())),
            lookups: LookupRecommendationsUseCase::new(
                knowledge.clone(),
                Arc::new(CannedSuggestions),
            ),
            documents: AnalyzeDocumentUseCase::new(knowledge, Arc::new(TextAnalyzer))
                .with_max_bytes(max_bytes),
        };
        router(Arc::new(state))
    }

    fn flu_app() -> Router {
        app_with(
            vec![Condition::new("flu", ["fever", "cough"]).with_prior(0.5)],
            1024,
        )
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::post(uri).body(Body::empty()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn upload(filename: &str, content: &[u8]) -> Request<Body> {
        let boundary = "medassist-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::post("/api/upload-medical-document")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    // ==================== Diagnosis Flow ====================

    #[tokio::test]
    async fn test_full_diagnosis_over_http() {
        let app = flu_app();

        let (status, started) = send(&app, post_empty("/api/start-diagnosis")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["is_complete"], json!(false));
        assert_eq!(started["symptom"], json!("fever"));
        assert!(started["question"].as_str().unwrap().contains("fever"));
        let session_id = started["session_id"].as_str().unwrap().to_string();

        let (status, second) = send(
            &app,
            post_json(
                "/api/answer-question",
                json!({"session_id": session_id, "answer": "yes"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["symptom"], json!("cough"));

        let (status, done) = send(
            &app,
            post_json(
                "/api/answer-question",
                json!({"session_id": session_id, "answer": "yes"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(done["is_complete"], json!(true));
        assert!(done["confidence_score"].as_f64().unwrap() >= 0.75);
        assert!(done["final_diagnosis"].as_str().unwrap().contains("flu"));
        assert_eq!(done["potential_conditions"], json!(["flu"]));
        assert!(done["recommendations"]["disclaimer"].is_string());

        let (status, snapshot) =
            send(&app, get(&format!("/api/session/{}", session_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["is_complete"], json!(true));
        assert_eq!(snapshot["history"].as_array().unwrap().len(), 2);
        assert_eq!(snapshot["history"][0]["answer"], json!("yes"));
    }

    #[tokio::test]
    async fn test_answer_errors_map_to_statuses() {
        let app = flu_app();
        let (_, started) = send(&app, post_empty("/api/start-diagnosis")).await;
        let session_id = started["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            post_json(
                "/api/answer-question",
                json!({"session_id": "nope", "answer": "yes"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("session_not_found"));

        let (status, body) = send(
            &app,
            post_json(
                "/api/answer-question",
                json!({"session_id": session_id, "answer": "perhaps"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], json!("invalid_answer"));

        let (status, body) = send(
            &app,
            post_json("/api/answer-question", json!({"answer": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("invalid_request"));

        for _ in 0..2 {
            send(
                &app,
                post_json(
                    "/api/answer-question",
                    json!({"session_id": session_id, "answer": "yes"}),
                ),
            )
            .await;
        }
        let (status, body) = send(
            &app,
            post_json(
                "/api/answer-question",
                json!({"session_id": session_id, "answer": "no"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], json!("session_completed"));
    }

    #[tokio::test]
    async fn test_unknown_session_snapshot_is_404() {
        let (status, _) = send(&flu_app(), get("/api/session/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ==================== Lookups ====================

    #[tokio::test]
    async fn test_conditions_and_health() {
        let app = app_with(builtin_conditions(), 1024);

        let (status, conditions) = send(&app, get("/api/conditions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(conditions.as_array().unwrap().len(), 12);
        assert_eq!(conditions[0]["name"], json!("Common Cold"));

        send(&app, post_empty("/api/start-diagnosis")).await;
        let (status, health) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], json!("ok"));
        assert_eq!(health["conditions"], json!(12));
        assert_eq!(health["active_sessions"], json!(1));
    }

    #[tokio::test]
    async fn test_medicine_and_exercise_lookups() {
        let app = app_with(builtin_conditions(), 1024);

        let (status, matched) = send(
            &app,
            post_json(
                "/api/get-medicine-suggestions",
                json!({"disease_name": "asthma"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(matched["matched_condition"], json!("Asthma"));
        assert!(matched["medicines"].is_array());

        let (status, fallback) = send(
            &app,
            post_json(
                "/api/get-exercise-suggestions",
                json!({"condition": "rare tropical fever"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            fallback["ai_suggestions"],
            json!("general exercise advice for rare tropical fever")
        );

        let (status, _) = send(
            &app,
            post_json("/api/get-medicine-suggestions", json!({"disease_name": " "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ==================== Documents ====================

    #[tokio::test]
    async fn test_upload_text_document() {
        let app = app_with(builtin_conditions(), 1024);

        let (status, report) =
            send(&app, upload("notes.txt", b"Patient has asthma and wheezing")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["filename"], json!("notes.txt"));
        assert_eq!(report["analysis"]["matched_condition"], json!("Asthma"));
        assert!(report["recommendations"]["ai_recommendations"].is_string());
    }

    #[tokio::test]
    async fn test_upload_rejections() {
        let app = app_with(builtin_conditions(), 16);

        let (status, body) = send(&app, upload("scan.bin", &[0xff, 0xfe, 0xfd])).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"], json!("unsupported_document"));

        let (status, body) = send(&app, upload("long.txt", &[b'a'; 64])).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], json!("payload_too_large"));

        let (status, _) = send(&app, upload("empty.txt", b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
