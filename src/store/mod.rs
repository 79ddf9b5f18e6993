//! Document store
//!
//! Key-addressed persistence for the three collections. Every backend:
//!
//! - validates a document against its collection [`Schema`] before writing,
//! - assigns the `id` (a ULID) and `createdAt` stamp itself,
//! - returns `Ok(None)` for ids it never issued, malformed or not.
//!
//! Backends:
//! - [`MemoryStore`]: concurrent in-process map
//! - [`PgDocumentStore`]: JSONB rows in PostgreSQL

pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::config::{StoreBackend, StoreConfig};
use crate::db::Database;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use schema::{FieldError, FieldErrorKind, FieldKind, FieldSpec, Schema, ValidationError};

/// A stored record: a JSON object keyed by field name
pub type Document = serde_json::Map<String, Value>;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Products,
    Orders,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
            Collection::Orders => "orders",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            Collection::Users => &schema::USER_SCHEMA,
            Collection::Products => &schema::PRODUCT_SCHEMA,
            Collection::Orders => &schema::ORDER_SCHEMA,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage contract shared by all backends
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Validate, assign an id and persist. Returns the stored record.
    ///
    /// A document rejected by the schema is never written.
    async fn insert(&self, collection: Collection, doc: Document) -> Result<Document, StoreError>;

    /// Fetch a record by id. `Ok(None)` when no such record exists.
    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Cheap reachability check
    async fn ping(&self) -> Result<(), StoreError>;
}

/// A validated document with its store-assigned identity
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub body: Document,
}

/// Run schema validation and stamp identity fields.
///
/// A caller-supplied `id` is discarded; the store owns identifiers.
pub fn prepare_insert(
    collection: Collection,
    mut doc: Document,
) -> Result<NewDocument, StoreError> {
    collection
        .schema()
        .validate(&doc)
        .map_err(StoreError::Validation)?;

    let id = ulid::Ulid::new().to_string();
    let created_at = Utc::now();

    doc.remove(ID_FIELD);
    doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
    doc.insert(
        CREATED_AT_FIELD.to_string(),
        Value::String(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    Ok(NewDocument {
        id,
        created_at,
        body: doc,
    })
}

/// Bound a store call by `limit`; elapsed calls become [`StoreError::Timeout`]
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: std::future::Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit.as_millis() as u64)),
    }
}

/// Build the configured backend. Fails if the backend cannot be reached.
pub async fn connect(config: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
            Ok(store)
        }
        StoreBackend::Postgres => {
            let url = config
                .postgres_url
                .as_deref()
                .context("store.postgres_url is required for the postgres backend")?;
            let db = Database::connect(url, config.max_connections)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.ensure_schema()
                .await
                .context("Failed to create documents table")?;
            let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(Arc::new(db)));
            Ok(store)
        }
    }
}
