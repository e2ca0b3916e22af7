//! Metrics endpoint handler

use axum::{http::StatusCode, response::IntoResponse};

/// `GET /api/v1/metrics` in the Prometheus text format.
pub async fn metrics_handler() -> impl IntoResponse {
    match crate::metrics::gather_text() {
        Ok(body) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        ),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                "Failed to encode metrics".to_string(),
            )
        }
    }
}
