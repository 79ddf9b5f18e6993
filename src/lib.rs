//! Storefront - minimal e-commerce backend
//!
//! HTTP endpoints for users, products and orders over a document store.
//! Orders reference a user and a product by id; those references are
//! resolved into full records when an order is read.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration (`config/{env}.yaml`)
//! - [`logging`] - tracing subscriber setup
//! - [`store`] - document store trait, schemas, memory and PostgreSQL backends
//! - [`db`] - PostgreSQL connection pool
//! - [`gateway`] - axum router, handlers and services

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod store;

// Convenient re-exports at crate root
pub use config::{AppConfig, DanglingReference, OrdersConfig, StoreBackend};
pub use gateway::services::{OrderService, RecordService, ServiceError};
pub use gateway::state::AppState;
pub use gateway::{build_router, run_server};
pub use store::{Collection, Document, DocumentStore, MemoryStore, PgDocumentStore, StoreError};
