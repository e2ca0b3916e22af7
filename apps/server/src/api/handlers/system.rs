//! Unauthenticated service endpoints

use axum::{response::IntoResponse, Json};
use serde_json::json;

/// `GET /api/v1/health`
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
