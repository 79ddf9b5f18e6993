//! Root and health check handlers

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{Json, extract::State, http::StatusCode};
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ErrorBody, ok};
use crate::store::with_timeout;

pub const WELCOME: &str = "Welcome to the E-commerce API!";

/// GET /
pub async fn index() -> &'static str {
    WELCOME
}

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Backend serving the collections
    #[schema(example = "postgres")]
    pub store: String,
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
}

/// Health check endpoint
///
/// Pings the document store and names the backend that answered. Ping
/// failure details go to the logs, not the 503 body.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Store unreachable", body = ErrorBody)
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<HealthResponse>)> {
    if let Err(e) = with_timeout(state.store_timeout, state.store.ping()).await {
        tracing::error!("[HEALTH] {} ping failed: {}", state.store.name(), e);
        return ApiError::Unavailable("unavailable".to_string()).into_err();
    }

    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    ok(HealthResponse {
        status: "ok".to_string(),
        store: state.store.name().to_string(),
        timestamp_ms,
    })
}
