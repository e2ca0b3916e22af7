//! Request ID and request log middleware

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

use crate::request_context::RequestContext;

/// Paths polled by infrastructure; their completion records go to DEBUG.
const QUIET_PATHS: &[&str] = &["/api/v1/health", "/api/v1/metrics"];

/// Assigns a server request id, exposes it to handlers through
/// [`RequestContext`] and logs one record when the request completes.
///
/// The response always carries `x-request-id`. A client-supplied id is
/// echoed back in `x-correlation-id`.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();

    let client_id = header_str(&req, "x-request-id").map(String::from);
    let client_ip = header_str(&req, "x-forwarded-for")
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| header_str(&req, "x-real-ip").map(String::from))
        .unwrap_or_else(|| "-".to_string());
    let user_agent = header_str(&req, "user-agent").unwrap_or("-").to_string();

    let request_id = Uuid::new_v4().to_string();
    req.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
        correlation_id: client_id.clone(),
    });

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    if QUIET_PATHS.contains(&path.as_str()) {
        tracing::debug!(
            method = %method,
            path = %path,
            status,
            latency_ms,
            request_id = %request_id,
            "Request completed"
        );
    } else {
        let resource_type = crate::metrics::extract_resource_type(&path)
            .map(|kind| kind.name())
            .unwrap_or("-");
        tracing::info!(
            method = %method,
            path = %path,
            resource_type,
            status,
            latency_ms,
            client_ip = %client_ip,
            user_agent = %user_agent,
            request_id = %request_id,
            "Request completed"
        );
    }

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert("x-request-id", value);
    }
    if let Some(client_id) = client_id {
        if let Ok(value) = HeaderValue::from_str(&client_id) {
            headers.insert("x-correlation-id", value);
        }
    }

    response
}

fn header_str<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}
