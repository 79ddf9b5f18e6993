//! API response and error types
//!
//! Success bodies are the stored records themselves. Failures map onto three
//! buckets:
//!
//! | Variant      | Status | Body                       |
//! |--------------|--------|----------------------------|
//! | `Validation` | 400    | [`ErrorBody`] with `errors` |
//! | `NotFound`   | 404    | empty                      |
//! | `Internal`   | 500    | [`ErrorBody`]              |
//!
//! plus `Unavailable` (503) for the health probe.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::gateway::services::ServiceError;
use crate::store::{FieldError, ValidationError};

/// JSON body for 400/500/503 responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Error bucket: `ValidationError` | `InternalError` | `Unavailable`
    #[schema(example = "ValidationError")]
    pub name: String,
    /// Underlying detail, passed through unchanged
    pub message: String,
    /// Per-path rejections (validation failures only)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, FieldError>,
}

impl ErrorBody {
    fn new(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    NotFound,
    Internal(String),
    Unavailable(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => ApiError::Validation(v),
            ServiceError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound => return status.into_response(),
            ApiError::Validation(v) => ErrorBody {
                name: "ValidationError".to_string(),
                message: v.message,
                errors: v.errors,
            },
            ApiError::Internal(msg) => ErrorBody::new("InternalError", msg),
            ApiError::Unavailable(msg) => ErrorBody::new("Unavailable", msg),
        };
        (status, Json(body)).into_response()
    }
}

/// 200 with the record as body
pub fn ok<T: Serialize>(data: T) -> ApiResult<(StatusCode, Json<T>)> {
    Ok((StatusCode::OK, Json(data)))
}

/// 201 with the stored record as body
pub fn created<T: Serialize>(data: T) -> ApiResult<(StatusCode, Json<T>)> {
    Ok((StatusCode::CREATED, Json(data)))
}
