use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, OrdersConfig};
use crate::store::{Collection, DocumentStore};

use super::services::{OrderService, RecordService};

/// Gateway application state (shared, read-only)
#[derive(Clone)]
pub struct AppState {
    /// Document store every service talks to
    pub store: Arc<dyn DocumentStore>,
    /// Upper bound per store call
    pub store_timeout: Duration,
    /// Reference handling for orders
    pub orders: OrdersConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        store_timeout: Duration,
        orders: OrdersConfig,
    ) -> Self {
        Self {
            store,
            store_timeout,
            orders,
        }
    }

    pub fn from_config(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        Self::new(
            store,
            Duration::from_millis(config.store.timeout_ms),
            config.orders,
        )
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.store.clone(), self.store_timeout, self.orders)
    }

    pub fn record_service(&self, collection: Collection) -> RecordService {
        RecordService::new(self.store.clone(), self.store_timeout, collection)
    }
}
