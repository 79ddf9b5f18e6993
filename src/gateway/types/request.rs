//! Request body handling
//!
//! Bodies are accepted as free-form JSON. Anything that is not a JSON object
//! is rejected the same way a schema failure is: 400 with a validation body.

use axum::{Json, extract::rejection::JsonRejection};
use serde_json::Value;

use super::response::ApiError;
use crate::store::{Collection, Document, ValidationError};

pub fn document_from_body(
    collection: Collection,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Document, ApiError> {
    let Json(value) = body.map_err(|e| {
        ApiError::Validation(ValidationError::malformed_body(collection, e.body_text()))
    })?;

    match value {
        Value::Object(doc) => Ok(doc),
        _ => Err(ApiError::Validation(ValidationError::malformed_body(
            collection,
            "request body must be a JSON object",
        ))),
    }
}
