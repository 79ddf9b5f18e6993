//! Plain create/fetch for records without relations (users, products)

use std::sync::Arc;
use std::time::Duration;

use super::ServiceError;
use crate::store::{Collection, Document, DocumentStore, ID_FIELD, with_timeout};

pub struct RecordService {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
    collection: Collection,
}

impl RecordService {
    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration, collection: Collection) -> Self {
        Self {
            store,
            timeout,
            collection,
        }
    }

    pub async fn create(&self, body: Document) -> Result<Document, ServiceError> {
        let record = with_timeout(self.timeout, self.store.insert(self.collection, body))
            .await
            .map_err(|e| {
                if !e.is_validation() {
                    tracing::error!(
                        "[{}] Create failed on {}: {}",
                        self.collection,
                        self.store.name(),
                        e
                    );
                }
                ServiceError::from(e)
            })?;
        tracing::info!("[{}] Created {:?}", self.collection, record.get(ID_FIELD));
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        with_timeout(self.timeout, self.store.find_by_id(self.collection, id))
            .await
            .map_err(|e| {
                tracing::error!("[{}] Fetch {} failed: {}", self.collection, id, e);
                ServiceError::from(e)
            })
    }
}
