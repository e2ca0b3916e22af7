//! PostgreSQL implementation of [`DocumentStore`]
//!
//! Each collection is a table `(id UUID PRIMARY KEY, document JSONB)`.
//! Projection happens in SQL so unrequested keys never leave the database.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use std::time::Instant;
use uuid::Uuid;

use super::traits::{DocumentStore, StoreError, StoreResult, UpdateOutcome};
use crate::models::ResourceKind;

#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn observe<T>(kind: ResourceKind, query: &str, started: Instant, result: &StoreResult<T>) {
        crate::metrics::STORE_QUERY_DURATION_SECONDS
            .with_label_values(&[kind.collection(), query])
            .observe(started.elapsed().as_secs_f64());

        if let Err(err) = result {
            let error_type = match err {
                StoreError::Query(sqlx::Error::PoolTimedOut) => "pool_timeout",
                StoreError::Query(_) => "query",
                StoreError::Decode(_) => "decode",
                StoreError::Unavailable(_) => "unavailable",
            };
            crate::metrics::STORE_QUERY_ERRORS_TOTAL
                .with_label_values(&[kind.collection(), query, error_type])
                .inc();
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn find_one(
        &self,
        kind: ResourceKind,
        id: Uuid,
        projection: &[&str],
    ) -> StoreResult<Option<JsonValue>> {
        let started = Instant::now();

        // Table names come from ResourceKind, never from the request.
        let query = format!(
            r#"
            SELECT COALESCE(
                (SELECT jsonb_object_agg(field.key, field.value)
                   FROM jsonb_each(c.document) AS field
                  WHERE field.key = ANY($2)),
                '{{}}'::jsonb
            ) AS document
            FROM {table} AS c
            WHERE c.id = $1
            "#,
            table = kind.collection()
        );
        let keys: Vec<String> = projection.iter().map(|k| k.to_string()).collect();

        let result = async {
            let row = sqlx::query(&query)
                .bind(id)
                .bind(&keys)
                .fetch_optional(&self.pool)
                .await?;

            match row {
                Some(row) => Ok(Some(row.try_get::<JsonValue, _>("document")?)),
                None => Ok(None),
            }
        }
        .await;

        Self::observe(kind, "find_one", started, &result);
        result
    }

    async fn update_field(
        &self,
        kind: ResourceKind,
        id: Uuid,
        field: &str,
        value: JsonValue,
    ) -> StoreResult<UpdateOutcome> {
        let started = Instant::now();

        let query = format!(
            r#"
            WITH target AS (
                SELECT id, document -> $2::text AS previous
                FROM {table}
                WHERE id = $1
                FOR UPDATE
            )
            UPDATE {table} AS c
               SET document = jsonb_set(c.document, ARRAY[$2::text], $3::jsonb, true)
              FROM target
             WHERE c.id = target.id
            RETURNING (target.previous IS DISTINCT FROM $3::jsonb) AS modified
            "#,
            table = kind.collection()
        );

        let result = async {
            let row = sqlx::query(&query)
                .bind(id)
                .bind(field)
                .bind(&value)
                .fetch_optional(&self.pool)
                .await?;

            Ok(match row {
                Some(row) => UpdateOutcome {
                    matched: 1,
                    modified: u64::from(row.try_get::<bool, _>("modified")?),
                },
                None => UpdateOutcome::default(),
            })
        }
        .await;

        Self::observe(kind, "update_field", started, &result);
        result
    }
}
