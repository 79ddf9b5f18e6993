//! Gateway Services Layer
//!
//! Business logic extracted from handlers. Handlers stay thin HTTP adapters
//! that build a service from [`AppState`](super::state::AppState) per request
//! and map the outcome to a status code.

pub mod order;
pub mod record;

use thiserror::Error;

use crate::store::{StoreError, ValidationError};

pub use order::OrderService;
pub use record::RecordService;

/// Service outcome for everything except "not found", which is `Ok(None)`
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected by the store schema (or a reference check)
    #[error("{0}")]
    Validation(ValidationError),

    /// Any other failure; carries the underlying detail unchanged
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => ServiceError::Validation(v),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
