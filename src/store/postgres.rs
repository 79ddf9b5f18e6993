//! PostgreSQL document store
//!
//! Each record is one row of the `documents` table (see [`Database::ensure_schema`]).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::Row;
use sqlx::types::Json;

use super::{Collection, Document, DocumentStore, StoreError, prepare_insert};
use crate::db::Database;

pub struct PgDocumentStore {
    db: Arc<Database>,
}

impl PgDocumentStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: Collection, doc: Document) -> Result<Document, StoreError> {
        let prepared = prepare_insert(collection, doc)?;

        sqlx::query(
            r#"INSERT INTO documents (collection, id, body, created_at)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(collection.as_str())
        .bind(&prepared.id)
        .bind(Json(&prepared.body))
        .bind(prepared.created_at)
        .execute(self.db.pool())
        .await?;

        tracing::debug!("[STORE] {} inserted into {}", prepared.id, collection);
        Ok(prepared.body)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        // TEXT columns cannot hold NUL, so no stored id contains one
        if id.contains('\0') {
            return Ok(None);
        }

        let row = sqlx::query(r#"SELECT body FROM documents WHERE collection = $1 AND id = $2"#)
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let Json(body): Json<Value> = row.try_get("body")?;
        match body {
            Value::Object(doc) => Ok(Some(doc)),
            other => Err(StoreError::Corrupt {
                collection: collection.as_str(),
                id: id.to_string(),
                reason: format!("body is {} instead of an object", other),
            }),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.health_check().await?;
        Ok(())
    }
}
