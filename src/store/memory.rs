//! In-process document store

use async_trait::async_trait;
use dashmap::DashMap;

use super::{Collection, Document, DocumentStore, StoreError, prepare_insert};

/// Concurrent map keyed by `(collection, id)`.
///
/// State lives as long as the process; used for local runs and tests.
#[derive(Default)]
pub struct MemoryStore {
    docs: DashMap<(Collection, String), Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held for `collection`
    pub fn count(&self, collection: Collection) -> usize {
        self.docs.iter().filter(|e| e.key().0 == collection).count()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: Collection, doc: Document) -> Result<Document, StoreError> {
        let prepared = prepare_insert(collection, doc)?;
        self.docs
            .insert((collection, prepared.id.clone()), prepared.body.clone());
        tracing::debug!("[STORE] {} inserted into {}", prepared.id, collection);
        Ok(prepared.body)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .docs
            .get(&(collection, id.to_string()))
            .map(|entry| entry.value().clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
