use askama::Template;
use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Landing page with the chat UI.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {}
}

/// Request body for the echo endpoint; a missing message echoes empty.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub reply: String,
}

pub async fn process(Json(request): Json<ProcessRequest>) -> Json<ProcessResponse> {
    Json(ProcessResponse {
        reply: format!("Python received: {}", request.message),
    })
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
