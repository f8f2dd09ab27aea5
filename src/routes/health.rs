//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.

use axum::Json;
use serde_json::{json, Value};

/// Health check handler.
///
/// Always answers with an empty JSON object. This is a liveness probe; it
/// only checks that the process can respond to HTTP.
pub async fn health() -> Json<Value> {
    Json(json!({}))
}
