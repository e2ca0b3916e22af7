//! Prometheus metrics for the clinical API

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, Encoder,
    HistogramVec, IntCounterVec, IntGaugeVec, TextEncoder,
};

use crate::api::API_PREFIX;
use crate::models::ResourceKind;

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "clinical_api_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "clinical_api_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    /// In-flight HTTP requests
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "clinical_api_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    // Resource Operation Metrics

    /// Service operations by resource type, operation and outcome
    pub static ref RESOURCE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "clinical_api_resource_operations_total",
        "Total number of resource service operations",
        &["resource_type", "operation", "outcome"]
    )
    .expect("Failed to register RESOURCE_OPERATIONS_TOTAL");

    /// Service operation duration
    pub static ref RESOURCE_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "clinical_api_resource_operation_duration_seconds",
        "Resource service operation duration in seconds",
        &["resource_type", "operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register RESOURCE_OPERATION_DURATION_SECONDS");

    // Document Store Metrics

    /// Store query duration
    pub static ref STORE_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "clinical_api_store_query_duration_seconds",
        "Document store query duration in seconds",
        &["collection", "query"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]
    )
    .expect("Failed to register STORE_QUERY_DURATION_SECONDS");

    /// Store query errors
    pub static ref STORE_QUERY_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "clinical_api_store_query_errors_total",
        "Total number of document store query errors",
        &["collection", "query", "error_type"]
    )
    .expect("Failed to register STORE_QUERY_ERRORS_TOTAL");
}

/// Render every registered metric in the Prometheus text format.
pub fn gather_text() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

const REVIEW_REQUEST_ACTION: &str = "review-request";

/// Collapse API paths onto a fixed set of route labels.
///
/// `/api/v1/encounters/<id>/review-request` becomes
/// `/api/v1/encounters/{id}/review-request`. Any path that is not a served
/// route collapses to `/api/v1/other`, or `/other` outside the API.
pub fn sanitize_path(path: &str) -> String {
    let Some(rest) = path.strip_prefix(API_PREFIX) else {
        return "/other".to_string();
    };

    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => API_PREFIX.to_string(),
        [single @ ("health" | "metrics")] => format!("{API_PREFIX}/{single}"),
        ["auth", "token"] => format!("{API_PREFIX}/auth/token"),
        [collection, _id] if ResourceKind::from_collection(collection).is_some() => {
            format!("{API_PREFIX}/{collection}/{{id}}")
        }
        [collection, _id, REVIEW_REQUEST_ACTION]
            if ResourceKind::from_collection(collection) == Some(ResourceKind::Encounter) =>
        {
            format!("{API_PREFIX}/{collection}/{{id}}/{REVIEW_REQUEST_ACTION}")
        }
        _ => format!("{API_PREFIX}/other"),
    }
}

/// Resource kind addressed by an API path, if any.
pub fn extract_resource_type(path: &str) -> Option<ResourceKind> {
    let rest = path.strip_prefix(API_PREFIX)?;
    let first = rest.split('/').find(|s| !s.is_empty())?;
    ResourceKind::from_collection(first)
}
