//! Order handlers (create, fetch with resolved references)

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

/// Create order endpoint
///
/// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    request_body(content = String, description = "Order fields; `userId` and `productId` are required, anything else is stored verbatim", content_type = "application/json"),
    responses(
        (status = 201, description = "Order created; body is the stored record", content_type = "application/json"),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let body = document_from_body(Collection::Orders, body)?;
    let order = state.order_service().create_order(body).await?;
    created(order)
}

/// Get order by ID with `userId`/`productId` replaced by the full records
///
/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with resolved user and product", content_type = "application/json"),
        (status = 404, description = "Order not found (empty body)"),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    match state.order_service().get_order(&id).await? {
        Some(order) => ok(order),
        None => ApiError::NotFound.into_err(),
    }
}
