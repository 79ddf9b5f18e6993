use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use storefront::{
    AppState, Collection, Document, DocumentStore, MemoryStore, OrdersConfig, StoreError,
    build_router,
};

/// Store whose every call fails as if the backend were down
struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn insert(&self, _: Collection, _: Document) -> Result<Document, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_id(&self, _: Collection, _: &str) -> Result<Option<Document>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

fn app_with(orders: OrdersConfig) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), Duration::from_secs(1), orders);
    (build_router(Arc::new(state)), store)
}

fn app() -> (Router, Arc<MemoryStore>) {
    app_with(OrdersConfig::default())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header(header::CONTENT_TYPE, "application/json");
    }
    let req = req
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::POST, uri, Some(&body.to_string())).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::GET, uri, None).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Register a user and a product, returning both stored records
async fn seed(app: &Router) -> (Value, Value) {
    let (status, user) = post_json(
        app,
        "/users/register",
        json!({"name": "Ada", "email": "ada@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, product) =
        post_json(app, "/products", json!({"name": "Lamp", "price": 19.5})).await;
    assert_eq!(status, StatusCode::CREATED);

    (user, product)
}

#[tokio::test]
async fn create_then_get_resolves_user_and_product() {
    let (app, _) = app();
    let (user, product) = seed(&app).await;

    let (status, order) = post_json(
        &app,
        "/orders",
        json!({"userId": user["id"], "productId": product["id"], "quantity": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = order["id"].as_str().expect("id assigned");
    assert!(!order_id.is_empty());
    assert_eq!(order["userId"], user["id"]);
    assert_eq!(order["productId"], product["id"]);
    assert_eq!(order["quantity"], 2);

    let (status, resolved) = get_json(&app, &format!("/orders/{}", order_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["id"], order["id"]);
    assert_eq!(resolved["userId"], user);
    assert_eq!(resolved["productId"], product);
    assert_eq!(resolved["quantity"], 2);
}

#[tokio::test]
async fn create_order_echoes_caller_fields() {
    let (app, _) = app();

    let (status, order) = post_json(
        &app,
        "/orders",
        json!({"userId": "U1", "productId": "P1", "quantity": 2, "note": "gift"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["userId"], "U1");
    assert_eq!(order["productId"], "P1");
    assert_eq!(order["quantity"], 2);
    assert_eq!(order["note"], "gift");
    assert!(order["createdAt"].is_string());
}

#[tokio::test]
async fn get_unknown_order_is_404_with_empty_body() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/orders/nonexistent-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn create_empty_order_is_400_and_not_stored() {
    let (app, store) = app();

    let (status, body) = post_json(&app, "/orders", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "ValidationError");
    assert_eq!(body["errors"]["userId"]["kind"], "required");
    assert_eq!(body["errors"]["productId"]["kind"], "required");
    assert_eq!(store.count(Collection::Orders), 0);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let (app, store) = app();

    let (status, bytes) = send(&app, Method::POST, "/orders", Some("{\"userId\":")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["name"], "ValidationError");

    let (status, _) = post_json(&app, "/orders", json!(["U1", "P1"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.count(Collection::Orders), 0);
}

#[tokio::test]
async fn repeated_gets_return_same_order() {
    let (app, _) = app();
    let (user, product) = seed(&app).await;
    let (_, order) = post_json(
        &app,
        "/orders",
        json!({"userId": user["id"], "productId": product["id"]}),
    )
    .await;
    let uri = format!("/orders/{}", order["id"].as_str().unwrap());

    let (_, first) = get_json(&app, &uri).await;
    let (_, second) = get_json(&app, &uri).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn dangling_reference_resolves_to_null() {
    let (app, _) = app();
    let (user, _) = seed(&app).await;
    let (_, order) = post_json(
        &app,
        "/orders",
        json!({"userId": user["id"], "productId": "deleted-product"}),
    )
    .await;

    let uri = format!("/orders/{}", order["id"].as_str().unwrap());
    let (status, resolved) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["userId"], user);
    assert!(resolved["productId"].is_null());
}

#[tokio::test]
async fn dangling_reference_error_policy_is_500() {
    let (app, _) = app_with(OrdersConfig {
        dangling_reference: storefront::DanglingReference::Error,
        ..OrdersConfig::default()
    });
    let (_, order) = post_json(&app, "/orders", json!({"userId": "U1", "productId": "P1"})).await;

    let uri = format!("/orders/{}", order["id"].as_str().unwrap());
    let (status, body) = get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["name"], "InternalError");
}

#[tokio::test]
async fn verify_references_rejects_unknown_user() {
    let (app, store) = app_with(OrdersConfig {
        verify_references: true,
        ..OrdersConfig::default()
    });
    let (_, product) = seed(&app).await;

    let (status, body) = post_json(
        &app,
        "/orders",
        json!({"userId": "U404", "productId": product["id"]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["userId"]["kind"], "reference");
    assert_eq!(store.count(Collection::Orders), 0);
}

#[tokio::test]
async fn users_and_products_round_trip() {
    let (app, _) = app();
    let (user, product) = seed(&app).await;

    let (status, fetched) =
        get_json(&app, &format!("/users/{}", user["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, user);

    let (status, fetched) =
        get_json(&app, &format!("/products/{}", product["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, product);

    let (status, body) = send(&app, Method::GET, "/users/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn invalid_user_and_product_are_400() {
    let (app, _) = app();

    let (status, body) = post_json(&app, "/users/register", json!({"name": "Ada"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["email"]["kind"], "required");

    let (status, body) =
        post_json(&app, "/products", json!({"name": "Lamp", "price": "cheap"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["price"]["kind"], "type");
}

#[tokio::test]
async fn root_and_health() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, storefront::gateway::handlers::WELCOME.as_bytes());

    let (status, health) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["store"], "memory");
}

#[tokio::test]
async fn openapi_document_served() {
    let (app, _) = app();
    let (status, doc) = get_json(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/orders/{id}"].is_object());
}

#[tokio::test]
async fn health_is_503_when_store_unreachable() {
    let state = AppState::new(
        Arc::new(UnreachableStore),
        Duration::from_secs(1),
        OrdersConfig::default(),
    );
    let app = build_router(Arc::new(state));

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["name"], "Unavailable");

    let order = json!({"userId": "U1", "productId": "P1"});
    let (status, body) = post_json(&app, "/orders", order).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["name"], "InternalError");
}

#[tokio::test]
async fn nul_character_in_any_field_is_400_and_not_stored() {
    let (app, store) = app();

    let (status, body) = post_json(
        &app,
        "/orders",
        json!({"userId": "U1", "productId": "P1", "note": "a\u{0}b"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "ValidationError");
    assert_eq!(body["errors"]["note"]["kind"], "invalid");
    assert_eq!(store.count(Collection::Orders), 0);
}

#[tokio::test]
async fn nul_byte_in_path_id_is_404() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/orders/abc%00def", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}
