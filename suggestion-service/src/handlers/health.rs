use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe; no upstream checks, no side effects.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
