//! Handler tests for the Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! Unlike E2E tests, these test ONLY the products domain handlers,
//! not the full application with routing, docs, middleware, etc.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::{TestDatabase, TestDataBuilder};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_product(name: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": name,
                "price": "9.99",
                "image": "http://x/img.png",
                "weight": "200g"
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_create_product_handler_returns_201() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let name = builder.name("product", "mug");

    let response = app.oneshot(post_product(&name)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, name);
    assert!(!product.id.is_empty());
    assert!(product.updated_on.is_none());
}

#[tokio::test]
async fn test_create_product_handler_validates_input() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    // Invalid name (empty string)
    let response = app.oneshot(post_product("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_create_returns_400_and_single_record() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("handler_duplicate");
    let name = builder.name("product", "dup");

    let first = app.clone().oneshot(post_product(&name)).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.clone().oneshot(post_product(&name)).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body_bytes = second.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(body_bytes.to_vec()).unwrap();
    assert!(body_str.contains("already exists"));

    // Exactly one record remains
    let list = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::OK);
    let page: serde_json::Value = json_body(list.into_body()).await;
    assert_eq!(page["count"], 1);
}

#[tokio::test]
async fn test_get_product_handler_returns_404_for_missing() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/no-such-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_on_empty_store_returns_404() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    // An empty result set is 404, not an empty 200 envelope
    let response = app
        .oneshot(
            Request::builder()
                .uri("/?skip=0&limit=20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_products_returns_page_envelope() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("handler_list");
    for i in 0..2 {
        let response = app
            .clone()
            .oneshot(post_product(&builder.name("product", &format!("p{}", i))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?skip=0&limit=20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(page["skip"], 0);
    assert_eq!(page["limit"], 20);
    assert_eq!(page["count"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_patch_product_handler_changes_only_named_field() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    let builder = TestDataBuilder::from_test_name("handler_patch");
    let name = builder.name("product", "patch");

    let created = app.clone().oneshot(post_product(&name)).await.unwrap();
    let created: Product = json_body(created.into_body()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", created.id))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({"name": "Mug XL"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let patched: Product = json_body(response.into_body()).await;
    assert_eq!(patched.name, "Mug XL");
    assert_eq!(patched.price, created.price);
    assert_eq!(patched.image, created.image);
    assert_eq!(patched.weight, created.weight);
    assert!(patched.updated_on.is_some());
}

#[tokio::test]
async fn test_patch_missing_product_returns_404() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/no-such-id")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({"name": "Mug XL"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_lifecycle() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let app = handlers::router(service);

    // POST → 201 with generated id
    let response = app.clone().oneshot(post_product("Mug")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response.into_body()).await;

    // GET that id → 200 same fields
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched, created);

    // PUT same id → 200 updated name
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/{}", created.id))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "name": "Mug XL",
                        "price": "9.99",
                        "image": "http://x/img.png",
                        "weight": "200g"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Mug XL");

    // DELETE same id → 204 empty body
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    // GET same id → 404
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", created.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
