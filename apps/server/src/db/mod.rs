//! Database layer - document stores, pool and migrations

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::InMemoryDocumentStore;
pub use store::PostgresDocumentStore;
pub use traits::{DocumentStore, StoreError, StoreResult, UpdateOutcome};

use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Open the connection pool. Every pooled connection gets the configured
/// `statement_timeout`.
pub async fn connect_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .options([(
            "statement_timeout",
            format!("{}s", config.statement_timeout_seconds),
        )]);

    let pool = PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        min_connections = config.pool_min_size,
        max_connections = config.pool_max_size,
        "Database pool ready"
    );

    Ok(pool)
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
