//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::ErrorBody;
use crate::store::{FieldError, FieldErrorKind};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "Users, products and orders over a document store. Orders reference a user and a product by id and are returned with both resolved.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::record::register_user,
        crate::gateway::handlers::record::get_user,
        crate::gateway::handlers::record::create_product,
        crate::gateway::handlers::record::get_product,
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::order::get_order,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            FieldError,
            FieldErrorKind,
        )
    ),
    tags(
        (name = "Orders", description = "Order creation and retrieval with resolved references"),
        (name = "Users", description = "User records"),
        (name = "Products", description = "Product records"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
