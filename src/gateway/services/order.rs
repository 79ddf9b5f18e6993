//! Order Service - Business logic for order operations
//!
//! Orders hold `userId`/`productId` as plain id strings. They are written
//! as-is and only resolved into full records when an order is read.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use serde_json::Value;

use super::ServiceError;
use crate::config::{DanglingReference, OrdersConfig};
use crate::store::{
    Collection, Document, DocumentStore, FieldError, ID_FIELD, ValidationError, with_timeout,
};

/// Order Service - handles all order-related business logic
pub struct OrderService {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
    policy: OrdersConfig,
}

impl OrderService {
    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration, policy: OrdersConfig) -> Self {
        Self {
            store,
            timeout,
            policy,
        }
    }

    /// Persist a new order built from `body`. Returns the stored record.
    pub async fn create_order(&self, body: Document) -> Result<Document, ServiceError> {
        tracing::info!(
            "[ORDER] Create: userId={:?} productId={:?}",
            body.get("userId"),
            body.get("productId")
        );

        if self.policy.verify_references {
            Collection::Orders
                .schema()
                .validate(&body)
                .map_err(ServiceError::Validation)?;
            self.verify_references(&body).await?;
        }

        let order = with_timeout(self.timeout, self.store.insert(Collection::Orders, body))
            .await
            .map_err(|e| {
                if e.is_validation() {
                    tracing::info!("[ORDER] Create rejected: {}", e);
                } else {
                    tracing::error!("[ORDER] Create failed on {}: {}", self.store.name(), e);
                }
                ServiceError::from(e)
            })?;

        tracing::info!("[ORDER] Created {:?}", order.get(ID_FIELD));
        Ok(order)
    }

    /// Fetch an order and replace each reference with the record it points to.
    ///
    /// `Ok(None)` when no order has this id.
    pub async fn get_order(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        let Some(mut order) = self.fetch(Collection::Orders, id).await? else {
            tracing::info!("[ORDER] {} not found", id);
            return Ok(None);
        };

        let refs: Vec<(&'static str, Collection, String)> = order_references(&order)
            .map(|(path, target, ref_id)| (path, target, ref_id.to_string()))
            .collect();

        // References are independent, resolve them together
        let resolved = try_join_all(refs.iter().map(|(path, target, ref_id)| async move {
            self.fetch(*target, ref_id)
                .await
                .map(|record| (*path, *target, ref_id.as_str(), record))
        }))
        .await?;

        for (path, target, ref_id, record) in resolved {
            let value = match record {
                Some(record) => Value::Object(record),
                None => match self.policy.dangling_reference {
                    DanglingReference::Null => {
                        tracing::warn!(
                            "[ORDER] {} references missing {} record {} at {}",
                            id,
                            target,
                            ref_id,
                            path
                        );
                        Value::Null
                    }
                    DanglingReference::Error => {
                        return Err(ServiceError::Internal(format!(
                            "Order {} references missing {} record {} at {}",
                            id, target, ref_id, path
                        )));
                    }
                },
            };
            order.insert(path.to_string(), value);
        }

        Ok(Some(order))
    }

    async fn verify_references(&self, body: &Document) -> Result<(), ServiceError> {
        let checks = order_references(body).map(|(path, target, ref_id)| async move {
            self.fetch(target, ref_id)
                .await
                .map(|record| (path, target, ref_id, record.is_some()))
        });

        let errors: BTreeMap<String, FieldError> = try_join_all(checks)
            .await?
            .into_iter()
            .filter(|(.., exists)| !exists)
            .map(|(path, target, ref_id, _)| {
                (
                    path.to_string(),
                    FieldError::missing_reference(path, target, ref_id),
                )
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            let err = ValidationError::from_errors(Collection::Orders, errors);
            tracing::info!("[ORDER] Create rejected: {}", err);
            Err(ServiceError::Validation(err))
        }
    }

    async fn fetch(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, ServiceError> {
        with_timeout(self.timeout, self.store.find_by_id(collection, id))
            .await
            .map_err(|e| {
                tracing::error!(
                    "[ORDER] Fetch {}/{} failed on {}: {}",
                    collection,
                    id,
                    self.store.name(),
                    e
                );
                ServiceError::from(e)
            })
    }
}

/// Reference fields present on `doc` as strings, with their target collection
fn order_references(doc: &Document) -> impl Iterator<Item = (&'static str, Collection, &str)> {
    Collection::Orders
        .schema()
        .references()
        .filter_map(move |(path, target)| {
            doc.get(path)
                .and_then(Value::as_str)
                .map(|ref_id| (path, target, ref_id))
        })
}
