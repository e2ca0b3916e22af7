//! Application state shared by every handler

use anyhow::Context;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::Config;
use crate::db::{self, DocumentStore, PostgresDocumentStore};
use crate::models::{Patient, Practitioner};
use crate::projection::FieldSchema;
use crate::services::{EncounterService, ResourceService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub encounters: Arc<EncounterService>,
    pub patients: Arc<ResourceService<Patient>>,
    pub practitioners: Arc<ResourceService<Practitioner>>,
    /// Present when backed by PostgreSQL; closed on shutdown.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// Connect to PostgreSQL, apply migrations when enabled and wire the
    /// services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = db::connect_pool(&config.database).await?;

        if config.database.run_migrations {
            db::run_migrations(&pool)
                .await
                .context("Failed to prepare database schema")?;
        }

        let store: Arc<dyn DocumentStore> = Arc::new(PostgresDocumentStore::new(pool.clone()));
        let mut state = Self::with_store(config, store);
        state.db_pool = Some(pool);
        Ok(state)
    }

    /// State over an arbitrary document store, without a pool.
    ///
    /// Each kind's field schema is indexed here, once per process.
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let auth = AuthService::new(&config.auth);

        Self {
            auth: Arc::new(auth),
            encounters: Arc::new(EncounterService::with_schema(
                store.clone(),
                Arc::new(FieldSchema::new()),
            )),
            patients: Arc::new(ResourceService::with_schema(
                store.clone(),
                Arc::new(FieldSchema::<Patient>::new()),
            )),
            practitioners: Arc::new(ResourceService::with_schema(
                store,
                Arc::new(FieldSchema::<Practitioner>::new()),
            )),
            config: Arc::new(config),
            db_pool: None,
        }
    }
}
