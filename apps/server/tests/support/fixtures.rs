use async_trait::async_trait;
use clinical_api::db::{DocumentStore, StoreError, StoreResult, UpdateOutcome};
use clinical_api::models::ResourceKind;
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

pub fn encounter_document() -> Value {
    json!({
        "fhirId": "enc-1001",
        "fullUrl": "http://hapi.example.org/fhir/Encounter/enc-1001",
        "status": "in-progress",
        "class": "AMB",
        "period": {
            "start": "2024-03-01T08:00:00Z",
            "end": "2024-03-01T09:15:00Z"
        },
        "practitionerId": "0b0d7d4e-6c0e-4a64-9f1a-3f1f1b6a9a10",
        "patientId": "7a4f0e52-3f51-4b7b-a3c5-9f4b8e2d1c20"
    })
}

pub fn patient_document() -> Value {
    json!({
        "fhirId": "pat-2002",
        "givenName": "Ana",
        "familyName": "Souza",
        "birthDate": "1990-07-14",
        "gender": "female"
    })
}

pub fn practitioner_document() -> Value {
    json!({
        "fhirId": "prac-3003",
        "givenName": "Carlos",
        "familyName": "Lima"
    })
}

/// Store whose every call fails, for the database-error paths.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_one(
        &self,
        _kind: ResourceKind,
        _id: Uuid,
        _projection: &[&str],
    ) -> StoreResult<Option<Value>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update_field(
        &self,
        _kind: ResourceKind,
        _id: Uuid,
        _field: &str,
        _value: Value,
    ) -> StoreResult<UpdateOutcome> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Store that never answers within any request deadline.
pub struct HangingStore;

const HANG: Duration = Duration::from_secs(3600);

#[async_trait]
impl DocumentStore for HangingStore {
    async fn find_one(
        &self,
        _kind: ResourceKind,
        _id: Uuid,
        _projection: &[&str],
    ) -> StoreResult<Option<Value>> {
        tokio::time::sleep(HANG).await;
        Ok(None)
    }

    async fn update_field(
        &self,
        _kind: ResourceKind,
        _id: Uuid,
        _field: &str,
        _value: Value,
    ) -> StoreResult<UpdateOutcome> {
        tokio::time::sleep(HANG).await;
        Ok(UpdateOutcome::default())
    }
}
