//! Security headers middleware

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Headers set on every response, including errors and timeouts.
const STATIC_HEADERS: &[(&str, &str)] = &[
    // Responses are JSON; never let a browser reinterpret them.
    ("x-content-type-options", "nosniff"),
    // Nothing here is meant to be framed.
    ("x-frame-options", "DENY"),
    // Record ids travel in paths; keep them out of Referer.
    ("referrer-policy", "no-referrer"),
    // The API serves no active content.
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    // Patient data must not sit in shared or browser caches.
    ("cache-control", "no-store"),
    ("pragma", "no-cache"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";

/// Baseline response headers for an API that serves clinical records.
///
/// HSTS is only sent when the request arrived over HTTPS, directly or through
/// a proxy that reports it in `x-forwarded-proto`.
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let https = arrived_over_https(&req);

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for &(name, value) in STATIC_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    if https {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS),
        );
    }

    response
}

fn arrived_over_https(req: &Request) -> bool {
    let forwarded = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"));

    forwarded || req.uri().scheme_str() == Some("https")
}
