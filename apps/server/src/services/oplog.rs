//! Per-operation structured log records
//!
//! A service operation collects its context in an [`OperationLog`] while it
//! runs and emits exactly one record when it finishes, at INFO on success and
//! at WARN or ERROR on failure depending on the error class. An operation
//! dropped before it finishes (a timed-out request, a client hang-up) emits a
//! single WARN "cancelled" record instead.

use serde_json::{Map, Value as JsonValue};
use std::time::Instant;

use crate::error::Severity;
use crate::models::ResourceKind;

#[derive(Debug)]
pub struct OperationLog {
    operation: &'static str,
    kind: ResourceKind,
    resource_id: String,
    started: Instant,
    context: Map<String, JsonValue>,
    finished: bool,
}

impl OperationLog {
    pub fn start(operation: &'static str, kind: ResourceKind, resource_id: &str) -> Self {
        Self {
            operation,
            kind,
            resource_id: resource_id.to_string(),
            started: Instant::now(),
            context: Map::new(),
            finished: false,
        }
    }

    /// Add a context field. Later values replace earlier ones.
    pub fn record(&mut self, key: &str, value: impl Into<JsonValue>) {
        self.context.insert(key.to_string(), value.into());
    }

    /// Emit the record and the operation metrics.
    pub fn finish<T>(mut self, result: &crate::Result<T>, success_message: &str) {
        self.finished = true;

        let outcome = match result {
            Ok(_) => "success",
            Err(err) if err.status().is_client_error() => "client_error",
            Err(_) => "server_error",
        };
        let duration_ms = self.observe(outcome);
        let context = JsonValue::Object(std::mem::take(&mut self.context));
        let resource_type = self.kind.name();

        match result {
            Ok(_) => tracing::info!(
                operation = self.operation,
                resource_type,
                resource_id = %self.resource_id,
                duration_ms,
                context = %context,
                "{success_message}"
            ),
            Err(err) => match err.severity() {
                Severity::Warn => tracing::warn!(
                    operation = self.operation,
                    resource_type,
                    resource_id = %self.resource_id,
                    duration_ms,
                    context = %context,
                    error_code = err.code(),
                    error = %err,
                    "{} failed",
                    self.operation
                ),
                Severity::Error => tracing::error!(
                    operation = self.operation,
                    resource_type,
                    resource_id = %self.resource_id,
                    duration_ms,
                    context = %context,
                    error_code = err.code(),
                    error = %err,
                    "{} failed",
                    self.operation
                ),
            },
        }
    }

    /// Record the operation metrics and return the elapsed milliseconds.
    fn observe(&self, outcome: &str) -> f64 {
        let elapsed = self.started.elapsed();
        let resource_type = self.kind.name();
        crate::metrics::RESOURCE_OPERATIONS_TOTAL
            .with_label_values(&[resource_type, self.operation, outcome])
            .inc();
        crate::metrics::RESOURCE_OPERATION_DURATION_SECONDS
            .with_label_values(&[resource_type, self.operation])
            .observe(elapsed.as_secs_f64());
        elapsed.as_secs_f64() * 1000.0
    }
}

impl Drop for OperationLog {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let duration_ms = self.observe("cancelled");
        let context = JsonValue::Object(std::mem::take(&mut self.context));
        tracing::warn!(
            operation = self.operation,
            resource_type = self.kind.name(),
            resource_id = %self.resource_id,
            duration_ms,
            context = %context,
            "{} cancelled",
            self.operation
        );
    }
}
