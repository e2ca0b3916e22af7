//! Request metadata shared with handlers and inner middleware.

/// Inserted into request extensions by the request-id middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Server-assigned id, returned as `x-request-id`.
    pub request_id: String,
    /// Id supplied by the client, if any, echoed as `x-correlation-id`.
    pub correlation_id: Option<String>,
}
