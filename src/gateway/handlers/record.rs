//! User and product handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ErrorBody, created, document_from_body, ok};
use crate::store::{Collection, Document};

async fn create_record(
    state: &AppState,
    collection: Collection,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let body = document_from_body(collection, body)?;
    let record = state.record_service(collection).create(body).await?;
    created(record)
}

async fn get_record(
    state: &AppState,
    collection: Collection,
    id: &str,
) -> ApiResult<(StatusCode, Json<Document>)> {
    match state.record_service(collection).get(id).await? {
        Some(record) => ok(record),
        None => ApiError::NotFound.into_err(),
    }
}

/// Register a user
///
/// POST /users/register
#[utoipa::path(
    post,
    path = "/users/register",
    request_body(content = String, description = "User fields; `name` and `email` are required", content_type = "application/json"),
    responses(
        (status = 201, description = "User created", content_type = "application/json"),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    create_record(&state, Collection::Users, body).await
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User record", content_type = "application/json"),
        (status = 404, description = "User not found (empty body)"),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    get_record(&state, Collection::Users, &id).await
}

/// Add a product
///
/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body(content = String, description = "Product fields; `name` and numeric `price` are required", content_type = "application/json"),
    responses(
        (status = 201, description = "Product created", content_type = "application/json"),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    create_record(&state, Collection::Products, body).await
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product record", content_type = "application/json"),
        (status = 404, description = "Product not found (empty body)"),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    get_record(&state, Collection::Products, &id).await
}
