//! Generic projected read over one resource kind

use std::sync::Arc;
use uuid::Uuid;

use super::oplog::OperationLog;
use crate::db::{DocumentStore, StoreError};
use crate::projection::{FieldError, FieldSchema, Projectable};
use crate::{Error, Result};

/// Read service for a resource kind `R`.
///
/// Composes the document store with the kind's field schema: a read
/// validates the requested fields, fetches only those keys and returns the
/// partial response.
pub struct ResourceService<R: Projectable> {
    store: Arc<dyn DocumentStore>,
    schema: Arc<FieldSchema<R>>,
}

impl<R: Projectable> ResourceService<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_schema(store, Arc::new(FieldSchema::new()))
    }

    pub fn with_schema(store: Arc<dyn DocumentStore>, schema: Arc<FieldSchema<R>>) -> Self {
        Self { store, schema }
    }

    /// Fetch resource `id` restricted to the comma-separated `fields`.
    ///
    /// Fields are checked before the id, so a bad field list is reported
    /// even when the id is malformed too.
    pub async fn get(&self, id: &str, fields: &str) -> Result<R::Partial> {
        let kind = R::KIND;
        let mut log = OperationLog::start(kind.read_operation(), kind, id);
        log.record("requested_fields", fields);

        let result = self.fetch(id, fields, &mut log).await;
        log.finish(&result, &format!("{} retrieved", kind.name().to_lowercase()));
        result
    }

    async fn fetch(&self, id: &str, fields: &str, log: &mut OperationLog) -> Result<R::Partial> {
        let selection = self.schema.parse(fields).map_err(|err| {
            if let FieldError::Unknown(field) = &err {
                log.record("invalid_field", field.as_str());
            }
            Error::from(err)
        })?;
        log.record("field_count", selection.len() as u64);

        let key = parse_id(id)?;

        let document = self
            .store
            .find_one(R::KIND, key, selection.names())
            .await?
            .ok_or_else(|| Error::NotFound {
                resource_type: R::KIND.name(),
                id: id.to_string(),
            })?;

        let record: R = serde_json::from_value(document).map_err(StoreError::from)?;
        Ok(self.schema.project(&record, &selection))
    }
}

/// Parse a path id into the store key. The id is taken verbatim.
pub(crate) fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::InvalidInput(format!("invalid id: {id}")))
}
