//! Handler tests for the products router

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig, Role};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt;
use uuid::Uuid;

fn jwt() -> JwtAuth {
    JwtAuth::new(
        &JwtConfig::new(
            "access-secret-that-is-at-least-32-chars!",
            "refresh-secret-that-is-at-least-32-chars",
        )
        .unwrap(),
    )
}

fn app(db: &TestDatabase, jwt: &JwtAuth) -> Router {
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    Router::new().nest("/products", handlers::router(service, jwt))
}

fn staff_token(jwt: &JwtAuth) -> String {
    jwt.issue_pair(Uuid::now_v7(), "staff@example.com", Role::Staff)
        .unwrap()
        .access_token
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_catalog_reads_are_public() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let category = db.create_test_category("books").await;
    let product = db.create_test_product(category, 9.5, 4).await;

    let list = app(&db, &jwt)
        .oneshot(request(
            "GET",
            &format!("/products?category_id={}&order_by=price&sort=asc", category),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::OK);
    let body = json_body(list.into_body()).await;
    assert_eq!(body["message"], "products retrieved");
    assert_eq!(body["data"][0]["id"], product.to_string());

    let one = app(&db, &jwt)
        .oneshot(request("GET", &format!("/products/{}", product), None, None))
        .await
        .unwrap();
    assert_eq!(one.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_sort_column_is_400() {
    let db = TestDatabase::new().await;

    let response = app(&db, &jwt())
        .oneshot(request("GET", "/products?order_by=password_hash", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_offset_past_bigint_is_400() {
    let db = TestDatabase::new().await;

    for offset in ["18446744073709551615", "9223372036854775808"] {
        let response = app(&db, &jwt())
            .oneshot(request("GET", &format!("/products?offset={}", offset), None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "offset {}", offset);
        assert!(json_body(response.into_body()).await["message"].is_string());
    }

    let largest = app(&db, &jwt())
        .oneshot(request("GET", "/products?offset=9223372036854775807", None, None))
        .await
        .unwrap();
    assert_eq!(largest.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_product_needs_staff() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let category = db.create_test_category("garden").await;
    let payload = json!({
        "category_id": category,
        "name": "Shovel",
        "price": 19.9,
        "stock": 3
    });

    let customer_token = jwt
        .issue_pair(Uuid::now_v7(), "c@example.com", Role::Customer)
        .unwrap()
        .access_token;
    let customer = app(&db, &jwt)
        .oneshot(request("POST", "/products", Some(&customer_token), Some(payload.clone())))
        .await
        .unwrap();
    assert_eq!(customer.status(), StatusCode::FORBIDDEN);

    let staff = app(&db, &jwt)
        .oneshot(request("POST", "/products", Some(&staff_token(&jwt)), Some(payload)))
        .await
        .unwrap();
    assert_eq!(staff.status(), StatusCode::CREATED);
    let body = json_body(staff.into_body()).await;
    assert_eq!(body["message"], "product created");
    assert_eq!(body["data"]["stock"], 3);
}

#[tokio::test]
async fn test_zero_price_is_rejected() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let category = db.create_test_category("garden").await;

    let response = app(&db, &jwt)
        .oneshot(request(
            "POST",
            "/products",
            Some(&staff_token(&jwt)),
            Some(json!({ "category_id": category, "name": "Free", "price": 0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["details"]["price"].is_array());
}

#[tokio::test]
async fn test_add_stock_route() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let category = db.create_test_category("tools").await;
    let product = db.create_test_product(category, 3.0, 1).await;
    let uri = format!("/products/{}/stock", product);

    let response = app(&db, &jwt)
        .oneshot(request("PATCH", &uri, Some(&staff_token(&jwt)), Some(json!({ "quantity": 4 }))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(db.stock_of(product).await, 5);

    let rejected = app(&db, &jwt)
        .oneshot(request("PATCH", &uri, Some(&staff_token(&jwt)), Some(json!({ "quantity": 0 }))))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unassign_missing_link_is_404() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let category = db.create_test_category("misc").await;
    let product = db.create_test_product(category, 3.0, 1).await;

    let response = app(&db, &jwt)
        .oneshot(request(
            "DELETE",
            &format!("/products/{}/categories/{}", product, category),
            Some(&staff_token(&jwt)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "product or category not found");
}
