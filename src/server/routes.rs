//! Axum route handlers for the Dobby HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`   — Returns `{"status": "ok", "version": .., "live_provider": ..}`
//! - `POST /api/chat` — Validates `{type, input}` and answers with `{response}`
//!
//! A failing or unconfigured live model never changes the status code:
//! the fallback answer is returned with 200.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::responder::Dobby;
use crate::types::{ChatReply, ResponseType};

/// Characters of user input included in request logs.
const LOG_PREVIEW_CHARS: usize = 50;

/// Shared application state for the HTTP server.
#[derive(Clone, Debug)]
pub struct AppState {
    pub dobby: Arc<Dobby>,
}

impl AppState {
    pub fn new(dobby: Dobby) -> Self {
        Self {
            dobby: Arc::new(dobby),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(serde_json::json!({ "error": message })))
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler).fallback(method_not_allowed))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "dobby",
        "live_provider": state.dobby.live_provider(),
    }))
}

/// POST /api/chat — answer a question.
///
/// Request:  `{ "type": "explain" | "joke" | "riddle" | "solve", "input": "<topic>" }`
/// Response: `{ "response": "<text>" }`
///
/// `input` is validated before `type`, so a request that is wrong on both
/// counts reports the input error.
async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected chat body");
        error(StatusCode::BAD_REQUEST, "Invalid request body")
    })?;
    if !body.is_object() {
        return Err(error(StatusCode::BAD_REQUEST, "Invalid request body"));
    }

    let input = body
        .get("input")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Invalid input provided"))?;

    let kind: ResponseType = body
        .get("type")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Invalid request type"))?;

    tracing::info!(%kind, input = %preview(input), "Processing request");

    let answer = state.dobby.ask(kind, input).await;
    tracing::debug!(source = ?answer.source, chars = answer.text.chars().count(), "Answered");

    Ok(Json(ChatReply {
        response: answer.text,
    }))
}

async fn method_not_allowed() -> ApiError {
    error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// First characters of `input` for logging, with `...` when cut.
fn preview(input: &str) -> String {
    match input.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &input[..idx]),
        None => input.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::TOPIC_CATALOG;
    use crate::llms::providers::mock_upstream::MockUpstream;
    use crate::llms::GeminiCompletion;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    fn fallback_app() -> Router {
        app_router(AppState::new(Dobby::fallback_only()))
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = fallback_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::VERSION);
        assert_eq!(json["service"], "dobby");
        assert!(json["live_provider"].is_null());
    }

    #[tokio::test]
    async fn test_chat_without_credentials_uses_fallback() {
        let response = fallback_app()
            .oneshot(chat_request(r#"{"type":"explain","input":"  GRAVITY "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["response"], TOPIC_CATALOG[0].content.explain.unwrap());
    }

    #[tokio::test]
    async fn test_chat_generic_answer_is_not_escaped() {
        let response = fallback_app()
            .oneshot(chat_request(r#"{"type":"joke","input":"<b>quarks</b>"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert!(json["response"].as_str().unwrap().contains("\"<b>quarks</b>\""));
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_or_blank_input() {
        for body in [
            r#"{"type":"explain"}"#,
            r#"{"type":"explain","input":"   "}"#,
            r#"{"type":"explain","input":42}"#,
            r#"{"type":"bogus","input":""}"#,
        ] {
            let response = fallback_app().oneshot(chat_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            let json = json_body(response).await;
            assert_eq!(json["error"], "Invalid input provided");
        }
    }

    #[tokio::test]
    async fn test_chat_rejects_unknown_type() {
        for body in [
            r#"{"type":"bogus-type","input":"gravity"}"#,
            r#"{"input":"gravity"}"#,
            r#"{"type":"EXPLAIN","input":"gravity"}"#,
        ] {
            let response = fallback_app().oneshot(chat_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            let json = json_body(response).await;
            assert_eq!(json["error"], "Invalid request type");
        }
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_body() {
        for body in ["not json", "[1, 2]"] {
            let response = fallback_app().oneshot(chat_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            let json = json_body(response).await;
            assert_eq!(json["error"], "Invalid request body");
        }
    }

    #[tokio::test]
    async fn test_chat_wrong_method() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/api/chat")
            .body(Body::empty())
            .unwrap();

        let response = fallback_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = json_body(response).await;
        assert_eq!(json["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chat")
            .header("Origin", "https://example.com")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = fallback_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_chat_relays_live_answer() {
        let upstream = MockUpstream::start(vec![(
            StatusCode::OK,
            serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "Dinosaurs were giant lizards! 🦖" }] } }]
            }),
        )])
        .await;
        let mut provider = GeminiCompletion::new("gemini-test", Some("k".to_string()));
        provider.state.base_url = Some(upstream.base_url.clone());
        let app = app_router(AppState::new(Dobby::new(Some(Arc::new(provider)))));

        let response = app
            .oneshot(chat_request(r#"{"type":"explain","input":"dinosaurs"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["response"], "Dinosaurs were giant lizards! 🦖");
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_still_returns_ok() {
        let upstream = MockUpstream::start(vec![(
            StatusCode::FORBIDDEN,
            serde_json::json!({ "error": { "message": "denied" } }),
        )])
        .await;
        let mut provider = GeminiCompletion::new("gemini-test", Some("k".to_string()));
        provider.state.base_url = Some(upstream.base_url.clone());
        let app = app_router(AppState::new(Dobby::new(Some(Arc::new(provider)))));

        let response = app
            .oneshot(chat_request(r#"{"type":"riddle","input":"my cat"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["response"], TOPIC_CATALOG[4].content.riddle.unwrap());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short"), "short");
        let long = "é".repeat(60);
        let cut = preview(&long);
        assert_eq!(cut.chars().count(), 53);
        assert!(cut.ends_with("..."));
    }
}
