//! Local stand-in for a hosted model API, used by tests.
//!
//! Binds `127.0.0.1:0`, answers every request with the next scripted
//! reply (the last one repeats) and records what it received.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    Json, Router,
};
use serde_json::Value;

/// A request as seen by the mock.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub uri: String,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct Upstream {
    replies: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
    seen: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Handle to a running mock.
pub struct MockUpstream {
    pub base_url: String,
    seen: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockUpstream {
    /// Start a mock that replies with `replies` in order.
    pub async fn start(replies: Vec<(StatusCode, Value)>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = Upstream {
            replies: Arc::new(Mutex::new(replies.into())),
            seen: seen.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn handle(
    State(upstream): State<Upstream>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    upstream.seen.lock().unwrap().push(CapturedRequest {
        uri: uri.to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let mut replies = upstream.replies.lock().unwrap();
    let reply = if replies.len() > 1 {
        replies.pop_front()
    } else {
        replies.front().cloned()
    };
    let (status, body) = reply.unwrap_or((StatusCode::NOT_FOUND, Value::Null));
    (status, Json(body))
}
