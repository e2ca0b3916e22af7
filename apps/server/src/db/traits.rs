//! Core trait for document storage backends

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ResourceKind;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Lower-level storage failure. Never shown to clients; the service layer
/// classifies it as a database error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Counts reported by a keyed update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents whose key matched (0 or 1).
    pub matched: u64,
    /// Documents whose stored value actually changed.
    pub modified: u64,
}

/// Document storage, one collection per resource kind.
///
/// Any backend (PostgreSQL JSONB, in-memory, ...) can implement this. All
/// lookups use the store-native key, never the external `fhirId`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by key, keeping only the top-level keys listed in
    /// `projection`.
    ///
    /// # Returns
    /// * `Ok(Some(doc))` - document found; keys outside the projection are absent
    /// * `Ok(None)` - no document with that key
    async fn find_one(
        &self,
        kind: ResourceKind,
        id: Uuid,
        projection: &[&str],
    ) -> StoreResult<Option<JsonValue>>;

    /// Set a single top-level key on one document.
    ///
    /// A missing document is not an error: it is reported as
    /// `matched == 0`.
    async fn update_field(
        &self,
        kind: ResourceKind,
        id: Uuid,
        field: &str,
        value: JsonValue,
    ) -> StoreResult<UpdateOutcome>;
}
