//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use growtogether_domain::DomainError;
use growtogether_shared::{ChooseRequest, ErrorResponse, SessionSnapshot, StartSessionRequest};

use super::views::snapshot_view;
use crate::app::App;
use crate::use_cases::turn::TurnError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/session", get(get_session).post(start_session))
        .route("/api/session/scenario", post(retry_scenario))
        .route("/api/session/choice", post(choose))
        .route("/api/session/next", post(next_turn))
        .route("/api/voice/latest", get(latest_voice))
}

async fn health() -> &'static str {
    "OK"
}

async fn snapshot(app: &App) -> Json<SessionSnapshot> {
    Json(snapshot_view(&app.turns.snapshot().await))
}

async fn get_session(State(app): State<Arc<App>>) -> Json<SessionSnapshot> {
    snapshot(&app).await
}

async fn start_session(
    State(app): State<Arc<App>>,
    body: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Json(request) = body?;
    app.turns
        .start(&request.player_name, &request.child_name, request.child_gender)
        .await?;
    Ok(snapshot(&app).await)
}

async fn retry_scenario(State(app): State<Arc<App>>) -> Result<Json<SessionSnapshot>, ApiError> {
    app.turns.request_scenario().await?;
    Ok(snapshot(&app).await)
}

async fn choose(
    State(app): State<Arc<App>>,
    body: Result<Json<ChooseRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let Json(request) = body?;
    app.turns.submit_choice(&request.choice_id).await?;
    Ok(snapshot(&app).await)
}

async fn next_turn(State(app): State<Arc<App>>) -> Result<Json<SessionSnapshot>, ApiError> {
    app.turns.next().await?;
    Ok(snapshot(&app).await)
}

async fn latest_voice(State(app): State<Arc<App>>) -> Result<Response, ApiError> {
    let clip = app
        .voice_clips
        .latest()
        .await
        .ok_or_else(|| ApiError::NotFound("No voice clip available".to_string()))?;
    Ok(([(header::CONTENT_TYPE, clip.content_type)], clip.audio).into_response())
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<TurnError> for ApiError {
    fn from(e: TurnError) -> Self {
        match &e {
            TurnError::NoSession => ApiError::NotFound(e.to_string()),
            TurnError::RequestInFlight(_) | TurnError::Superseded => {
                ApiError::Conflict(e.to_string())
            }
            TurnError::Domain(DomainError::InvalidStateTransition(_)) => {
                ApiError::Conflict(e.to_string())
            }
            TurnError::Domain(_) => ApiError::BadRequest(e.to_string()),
            TurnError::Content { message, .. } => ApiError::BadGateway(message.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use growtogether_domain::{Choice, Outcome, ParentingStyle, Scenario, ScenarioId, StatDelta};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{ContentError, LlmError, MockContentProvider};
    use crate::infrastructure::speech::{SilentVoice, VoiceClip, VoiceClipStore};

    fn scenario() -> Scenario {
        Scenario::new(
            ScenarioId::new(),
            "Broken vase",
            "You hear a crash in the living room.",
            "He broke it while trying to surprise you with flowers.",
            vec![
                Choice::new("1", "Ask what happened", ParentingStyle::Authoritative),
                Choice::new("2", "Shout", ParentingStyle::Authoritarian),
            ],
        )
        .unwrap()
    }

    fn app_with(content: MockContentProvider) -> Arc<App> {
        Arc::new(App::new(
            Arc::new(content),
            Arc::new(SilentVoice),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 5, 5, 5, 5, 5).unwrap())),
            Arc::new(VoiceClipStore::new()),
        ))
    }

    async fn send(
        app: &Arc<App>,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = routes()
            .with_state(app.clone())
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn start_body() -> Value {
        json!({"player_name": "Mom", "child_name": "Charlie", "child_gender": "boy"})
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = app_with(MockContentProvider::new());
        let response = routes()
            .with_state(app)
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn empty_snapshot_before_start() {
        let app = app_with(MockContentProvider::new());
        let (status, body) = send(&app, "GET", "/api/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"], Value::Null);
        assert_eq!(body["busy"], false);
    }

    #[tokio::test]
    async fn start_then_choose_then_next() {
        let mut content = MockContentProvider::new();
        content
            .expect_generate_scenario()
            .times(2)
            .returning(|_| Ok(scenario()));
        content
            .expect_evaluate_choice()
            .times(1)
            .returning(|_| {
                Ok(Outcome::new(
                    "He explains.",
                    "Relieved.",
                    "Asking first keeps him honest.",
                    StatDelta::new(5, -10, 0),
                ))
            });
        let app = app_with(content);

        let (status, body) = send(&app, "POST", "/api/session", Some(start_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "presenting_scenario");
        assert_eq!(body["session"]["child_name"], "Charlie");
        assert_eq!(body["scenario"]["title"], "Broken vase");
        assert!(body["scenario"].get("context").is_none());

        let (status, body) = send(
            &app,
            "POST",
            "/api/session/choice",
            Some(json!({"choice_id": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "presenting_outcome");
        assert_eq!(body["session"]["stats"], json!({"bonding": 55, "resilience": 20, "confidence": 30}));
        assert_eq!(body["session"]["history"], json!(["Age 0: Broken vase"]));
        assert_eq!(body["outcome"]["stat_changes"]["resilience"], -10);

        let (status, body) = send(&app, "POST", "/api/session/next", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["age"], 1);
        assert_eq!(body["session"]["stage"], "toddler");
        assert_eq!(body["phase"], "presenting_scenario");
        assert_eq!(body["outcome"], Value::Null);
    }

    #[tokio::test]
    async fn invalid_start_bodies_are_bad_requests() {
        let mut content = MockContentProvider::new();
        content.expect_generate_scenario().never();
        let app = app_with(content);

        let (status, body) = send(
            &app,
            "POST",
            "/api/session",
            Some(json!({"player_name": "Mom", "child_name": "  ", "child_gender": "girl"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("empty"));

        let (status, body) = send(
            &app,
            "POST",
            "/api/session",
            Some(json!({"player_name": "Mom", "child_name": "Kim", "child_gender": "robot"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn actions_without_session_are_not_found() {
        let app = app_with(MockContentProvider::new());
        let (status, body) = send(
            &app,
            "POST",
            "/api/session/choice",
            Some(json!({"choice_id": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No active session");
    }

    #[tokio::test]
    async fn wrong_phase_is_conflict() {
        let mut content = MockContentProvider::new();
        content
            .expect_generate_scenario()
            .times(1)
            .returning(|_| Ok(scenario()));
        let app = app_with(content);

        send(&app, "POST", "/api/session", Some(start_body())).await;
        let (status, _) = send(&app, "POST", "/api/session/next", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = send(&app, "POST", "/api/session/scenario", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn content_failure_is_bad_gateway_and_retryable() {
        let mut content = MockContentProvider::new();
        let mut seq = mockall::Sequence::new();
        content
            .expect_generate_scenario()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ContentError::Llm(LlmError::RequestFailed("timeout".into()))));
        content
            .expect_generate_scenario()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(scenario()));
        let app = app_with(content);

        let (status, body) = send(&app, "POST", "/api/session", Some(start_body())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to generate scenario. Please try again.");

        let (_, body) = send(&app, "GET", "/api/session", None).await;
        assert_eq!(body["phase"], "awaiting_scenario");
        assert_eq!(body["error"], "Failed to generate scenario. Please try again.");
        assert_eq!(body["session"]["stats"]["bonding"], 50);

        let (status, body) = send(&app, "POST", "/api/session/scenario", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "presenting_scenario");
        assert_eq!(body["error"], Value::Null);
    }

    #[tokio::test]
    async fn latest_voice_clip() {
        let app = app_with(MockContentProvider::new());
        let (status, _) = send(&app, "GET", "/api/voice/latest", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        app.voice_clips
            .store(VoiceClip {
                text: "爸爸".to_string(),
                content_type: "audio/mpeg".to_string(),
                audio: vec![0xff, 0xfb],
            })
            .await;
        let response = routes()
            .with_state(app)
            .oneshot(Request::get("/api/voice/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], &[0xff, 0xfb]);
    }
}
