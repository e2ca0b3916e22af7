//! Encounter service: projected reads plus the status update

use serde_json::Value as JsonValue;
use std::sync::Arc;

use super::oplog::OperationLog;
use super::resource::{parse_id, ResourceService};
use crate::db::{DocumentStore, UpdateOutcome};
use crate::models::{Encounter, EncounterStatus, PartialEncounter, ResourceKind};
use crate::projection::FieldSchema;
use crate::{Error, Result};

const UPDATE_STATUS_OPERATION: &str = "UpdateEncounterStatus";

pub struct EncounterService {
    resources: ResourceService<Encounter>,
    store: Arc<dyn DocumentStore>,
}

impl EncounterService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_schema(store, Arc::new(FieldSchema::new()))
    }

    pub fn with_schema(
        store: Arc<dyn DocumentStore>,
        schema: Arc<FieldSchema<Encounter>>,
    ) -> Self {
        Self {
            resources: ResourceService::with_schema(store.clone(), schema),
            store,
        }
    }

    pub async fn get(&self, id: &str, fields: &str) -> Result<PartialEncounter> {
        self.resources.get(id, fields).await
    }

    /// Replace the status of encounter `id`.
    ///
    /// Any vocabulary value may follow any other. Writing the current value
    /// again succeeds with `modified == 0`.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<UpdateOutcome> {
        let mut log = OperationLog::start(UPDATE_STATUS_OPERATION, ResourceKind::Encounter, id);
        log.record("new_status", status);

        let result = self.apply_status(id, status, &mut log).await;
        log.finish(&result, "encounter status updated");
        result
    }

    async fn apply_status(
        &self,
        id: &str,
        status: &str,
        log: &mut OperationLog,
    ) -> Result<UpdateOutcome> {
        let status: EncounterStatus = status
            .parse()
            .map_err(|_| Error::InvalidStatus(status.to_string()))?;
        let key = parse_id(id)?;

        let outcome = self
            .store
            .update_field(
                ResourceKind::Encounter,
                key,
                "status",
                JsonValue::from(status.as_str()),
            )
            .await?;

        log.record("matched_count", outcome.matched);
        log.record("modified_count", outcome.modified);

        if outcome.matched == 0 {
            return Err(Error::NotFound {
                resource_type: ResourceKind::Encounter.name(),
                id: id.to_string(),
            });
        }
        Ok(outcome)
    }
}
