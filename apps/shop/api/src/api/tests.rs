//! Whole-API flows through the assembled router.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtConfig, Role, create_router, health_router};
use core_config::{Environment, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::openapi::ApiDoc;
use crate::state::AppState;

fn state(db: &TestDatabase) -> AppState {
    let config = Config {
        app: app_info!(),
        database: PostgresConfig::new("postgres://unused"),
        server: ServerConfig::default(),
        jwt: JwtConfig::new(
            "access-secret-that-is-at-least-32-chars!",
            "refresh-secret-that-is-at-least-32-chars",
        )
        .unwrap(),
        environment: Environment::Development,
        run_migrations: false,
    };
    AppState::new(config, db.connection())
}

fn app(state: &AppState) -> Router {
    let root = health_router(state.config.app.clone()).merge(super::ready_router(state.clone()));
    create_router::<ApiDoc>(
        &state.config.server.api_prefix(),
        super::routes(state),
        root,
        CorsLayer::permissive(),
    )
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_probes_sit_outside_the_prefix() {
    let db = TestDatabase::new().await;
    let app = app(&state(&db));

    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "shop_api");

    let (status, body) = call(&app, "GET", "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");

    let (status, _) = call(&app, "GET", "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_shop_and_check_out() {
    let db = TestDatabase::new().await;
    let state = state(&db);
    let app = app(&state);

    let admin = db.create_test_user_with_role("admin").await;
    let admin_token = state
        .jwt
        .issue_pair(admin, "admin@example.com", Role::Admin)
        .unwrap()
        .access_token;

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/categories",
        Some(&admin_token),
        Some(json!({ "name": "Coffee", "description": "beans" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/products",
        Some(&admin_token),
        Some(json!({
            "category_id": category_id,
            "name": "Espresso blend",
            "price": 12.0,
            "stock": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id: Uuid = body["data"]["id"].as_str().unwrap().parse().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "email": "jo@example.com",
            "password": "hunter22",
            "full_name": "Jo Buyer",
            "role": "admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "user registered");
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    // Self-registration never grants a privileged role
    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/categories",
        Some(&token),
        Some(json!({ "name": "Forbidden" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/addresses",
        Some(&token),
        Some(json!({
            "address_line": "42 Roast Road",
            "city": "Portland",
            "state": "OR",
            "postal_code": "97201",
            "phone": "5035550100"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let address_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        "POST",
        "/api/v1/cart",
        Some(&token),
        Some(json!({ "product_id": product_id, "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        &app,
        "POST",
        "/api/v1/orders",
        Some(&token),
        Some(json!({ "address_id": address_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total_price"], 36.0);
    assert_eq!(body["data"]["address"]["city"], "Portland");

    let (status, body) = call(&app, "GET", "/api/v1/cart", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, body) = call(&app, "GET", "/api/v1/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["email"], "jo@example.com");

    assert_eq!(db.stock_of(product_id).await, 2);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let db = TestDatabase::new().await;
    let app = app(&state(&db));

    let (status, body) = call(&app, "GET", "/api/v1/nothing-here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}
