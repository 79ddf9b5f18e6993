//! Gateway types module
//!
//! - [`response`]: error buckets, their HTTP mapping, and success helpers
//! - [`request`]: turning raw JSON bodies into documents

pub mod request;
pub mod response;

pub use request::document_from_body;
pub use response::{ApiError, ApiResult, ErrorBody, created, ok};
