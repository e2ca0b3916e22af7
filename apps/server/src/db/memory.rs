//! In-memory implementation of [`DocumentStore`]
//!
//! Used by the integration tests and for running the API without a
//! database. Applies the same projection and update semantics as the
//! PostgreSQL store.

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::traits::{DocumentStore, StoreError, StoreResult, UpdateOutcome};
use crate::models::ResourceKind;

type Documents = HashMap<(ResourceKind, Uuid), JsonValue>;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<Documents>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under a fresh key and return the key.
    pub fn insert(&self, kind: ResourceKind, document: JsonValue) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        self.insert_with_id(kind, id, document)?;
        Ok(id)
    }

    pub fn insert_with_id(
        &self,
        kind: ResourceKind,
        id: Uuid,
        document: JsonValue,
    ) -> StoreResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Unavailable("document map lock poisoned".to_string()))?;
        documents.insert((kind, id), document);
        Ok(())
    }

    /// Full stored document, bypassing projection.
    pub fn get_raw(&self, kind: ResourceKind, id: Uuid) -> StoreResult<Option<JsonValue>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Unavailable("document map lock poisoned".to_string()))?;
        Ok(documents.get(&(kind, id)).cloned())
    }
}

fn project(document: &JsonValue, keys: &[&str]) -> JsonValue {
    let projected: Map<String, JsonValue> = match document.as_object() {
        Some(object) => object
            .iter()
            .filter(|(key, _)| keys.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        None => Map::new(),
    };
    JsonValue::Object(projected)
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_one(
        &self,
        kind: ResourceKind,
        id: Uuid,
        projection: &[&str],
    ) -> StoreResult<Option<JsonValue>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::Unavailable("document map lock poisoned".to_string()))?;
        Ok(documents
            .get(&(kind, id))
            .map(|document| project(document, projection)))
    }

    async fn update_field(
        &self,
        kind: ResourceKind,
        id: Uuid,
        field: &str,
        value: JsonValue,
    ) -> StoreResult<UpdateOutcome> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Unavailable("document map lock poisoned".to_string()))?;

        let Some(JsonValue::Object(document)) = documents.get_mut(&(kind, id)) else {
            return Ok(UpdateOutcome::default());
        };

        let modified = document.get(field) != Some(&value);
        if modified {
            document.insert(field.to_string(), value);
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }
}
