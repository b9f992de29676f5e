use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use product_catalog::di::ContainerBuilder;
use product_catalog::error::StorageError;
use product_catalog::infrastructure::MemoryDatabase;
use product_catalog::module::Module;
use product_catalog::modules::product::{
    DeletePolicy, Product, ProductController, ProductModule, ProductRepository, ProductService,
};
use product_catalog::server::build_router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app(policy: DeletePolicy) -> Router {
    let mut container = ContainerBuilder::new()
        .register(MemoryDatabase::new())
        .register(policy)
        .build();
    ProductModule::register(&mut container).unwrap();
    build_router(container.resolve::<ProductController>().unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    send_request(app, builder.body(body).unwrap()).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, _, created) = send(app, Method::POST, "/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

#[tokio::test]
async fn list_on_empty_storage_returns_empty_array() {
    let app = app(DeletePolicy::Strict);
    let (status, _, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_then_get_returns_identical_payload() {
    let app = app(DeletePolicy::Strict);
    let (status, headers, created) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "id": 0, "name": "Widget", "price": 9.99 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(headers[header::LOCATION], format!("/products/{}", id));
    assert_eq!(created, json!({ "id": id, "name": "Widget", "price": 9.99 }));

    let location = headers[header::LOCATION].to_str().unwrap().to_string();
    let (status, _, fetched) = send(&app, Method::GET, &location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, _, list) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(list, json!([created]));
}

#[tokio::test]
async fn create_with_client_supplied_id() {
    let app = app(DeletePolicy::Strict);
    let created = create(&app, json!({ "id": 42, "name": "Answer" })).await;
    assert_eq!(created, json!({ "id": 42, "name": "Answer", "price": null }));

    let (status, _, body) = send(&app, Method::POST, "/products", Some(json!({ "id": 42 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

fn post_raw(json: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

#[tokio::test]
async fn high_precision_price_round_trips_exactly() {
    let app = app(DeletePolicy::Strict);

    let (status, headers, created) =
        send_request(&app, post_raw(r#"{"id":0,"name":"P","price":12345678901234.56789}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"].to_string(), "12345678901234.56789");

    let location = headers[header::LOCATION].to_str().unwrap().to_string();
    let (_, _, fetched) = send(&app, Method::GET, &location, None).await;
    assert_eq!(fetched["price"].to_string(), "12345678901234.56789");

    let (_, _, small) = send_request(&app, post_raw(r#"{"name":"S","price":0.1234567890123456789}"#)).await;
    assert_eq!(small["price"].to_string(), "0.1234567890123456789");
}

#[tokio::test]
async fn auto_ids_keep_working_after_client_takes_max_id() {
    let app = app(DeletePolicy::Strict);
    let max = create(&app, json!({ "id": i32::MAX, "name": "Max" })).await;
    assert_eq!(max["id"].as_i64(), Some(i64::from(i32::MAX)));

    let first = create(&app, json!({ "id": 0, "name": "Widget" })).await;
    assert_eq!(first["id"].as_i64(), Some(1));
    let second = create(&app, json!({ "name": "Widget2" })).await;
    assert_eq!(second["id"].as_i64(), Some(2));
}

#[tokio::test]
async fn get_missing_product_is_404() {
    let app = app(DeletePolicy::Strict);
    let (status, _, body) = send(&app, Method::GET, "/products/12", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["error"], "NotFound");
    assert_eq!(body["message"], "Product 12 not found");
}

#[tokio::test]
async fn non_integer_path_id_is_400() {
    let app = app(DeletePolicy::Strict);
    let (status, _, body) = send(&app, Method::GET, "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["id"].is_array());
}

#[tokio::test]
async fn lookup_by_id_accepts_object_and_bare_int() {
    let app = app(DeletePolicy::Strict);
    let created = create(&app, json!({ "name": "Lookup", "price": 1.5 })).await;
    let id = created["id"].clone();

    for body in [json!({ "id": id }), json!({ "Id": id }), id.clone()] {
        let (status, _, found) = send(&app, Method::POST, "/products/lookup-by-id", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, created);
    }

    let (status, _, _) = send(&app, Method::POST, "/products/lookup-by-id", Some(json!({ "id": 999 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lookup_by_id_rejects_invalid_bodies() {
    let app = app(DeletePolicy::Strict);

    let (status, _, body) = send(&app, Method::POST, "/products/lookup-by-id", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["body"].is_array());

    let (status, _, body) = send(&app, Method::POST, "/products/lookup-by-id", Some(json!({ "id": -4 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["id"].is_array());
}

#[tokio::test]
async fn create_rejects_invalid_payloads() {
    let app = app(DeletePolicy::Strict);

    let (status, _, body) = send(&app, Method::POST, "/products", Some(json!({ "name": "Neg", "price": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["price"].is_array());

    let (status, _, body) = send(&app, Method::POST, "/products", Some(json!({ "price": "cheap" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["body"].is_array());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (_, _, list) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn put_missing_product_is_404_and_inserts_nothing() {
    let app = app(DeletePolicy::Strict);
    let (status, _, _) = send(&app, Method::PUT, "/products/5", Some(json!({ "id": 5, "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, list) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn put_with_mismatched_or_missing_id_is_400() {
    let app = app(DeletePolicy::Strict);
    let created = create(&app, json!({ "name": "Keep", "price": 2 })).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/products/{}", id);

    let (status, _, body) = send(&app, Method::PUT, &uri, Some(json!({ "id": id + 1, "name": "Other" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["id"].is_array());

    let (status, _, _) = send(&app, Method::PUT, &uri, Some(json!({ "name": "No id" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn put_replaces_the_whole_record() {
    let app = app(DeletePolicy::Strict);
    let created = create(&app, json!({ "name": "Before", "price": 3.25 })).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/products/{}", id);

    let (status, _, body) = send(&app, Method::PUT, &uri, Some(json!({ "id": id, "name": "After" }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, _, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, json!({ "id": id, "name": "After", "price": null }));
}

#[tokio::test]
async fn delete_twice_with_strict_policy() {
    let app = app(DeletePolicy::Strict);
    let created = create(&app, json!({ "name": "Doomed" })).await;
    let uri = format!("/products/{}", created["id"]);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_twice_with_idempotent_policy() {
    let app = app(DeletePolicy::Idempotent);
    let created = create(&app, json!({ "name": "Doomed" })).await;
    let uri = format!("/products/{}", created["id"]);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_route_is_json_404_with_request_id() {
    let app = app(DeletePolicy::Strict);
    let (status, headers, body) = send(&app, Method::GET, "/widgets", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
    assert!(headers.contains_key("x-request-id"));
}

struct BrokenRepository;

#[async_trait]
impl ProductRepository for BrokenRepository {
    async fn get_all(&self) -> Result<Vec<Product>, StorageError> {
        Err(StorageError::Connection("password authentication failed".into()))
    }
    async fn get_by_id(&self, _id: i32) -> Result<Option<Product>, StorageError> {
        Err(StorageError::Connection("password authentication failed".into()))
    }
    async fn add(&self, _product: Product) -> Result<Product, StorageError> {
        Err(StorageError::Backend("disk full".into()))
    }
    async fn update(&self, _product: Product) -> Result<bool, StorageError> {
        Err(StorageError::Backend("disk full".into()))
    }
    async fn delete(&self, _id: i32) -> Result<bool, StorageError> {
        Err(StorageError::Backend("disk full".into()))
    }
}

#[tokio::test]
async fn storage_failures_map_to_500() {
    let service = ProductService::new(Arc::new(BrokenRepository));
    let app = build_router(Arc::new(ProductController::new(Arc::new(service))));

    let (status, _, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "InternalServerError");
    assert_eq!(body["message"], "Internal Server Error");

    let (status, _, _) = send(&app, Method::POST, "/products", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _, _) = send(&app, Method::DELETE, "/products/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
