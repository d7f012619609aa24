//! HTTP front end.
//!
//! # Endpoints
//!
//! - `GET  /health`   — Liveness probe
//! - `POST /api/chat` — Answer `{ "type", "input" }` with `{ "response" }`

pub mod routes;

pub use routes::{app_router, AppState};
