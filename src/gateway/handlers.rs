//! HTTP handlers
//!
//! Thin adapters: parse the request, call a service, map the outcome.

pub mod health;
pub mod order;
pub mod record;

pub use health::{HealthResponse, WELCOME, health_check, index};
pub use order::{create_order, get_order};
pub use record::{create_product, get_product, get_user, register_user};
