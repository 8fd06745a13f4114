//! Handler tests for the users domain
//!
//! These exercise the `/auth` and `/users` routers over HTTP:
//! - the `{"message", "data"}` envelope and status codes
//! - bearer token and role guards
//! - error bodies for business failures

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig, Role};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestDatabase};
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
    let auth = AuthService::new(
        PgUserRepository::new(db.connection()),
        PgAuthTokenRepository::new(db.connection()),
        db.connection(),
        jwt.clone(),
    );
    let users = UserService::new(PgUserRepository::new(db.connection()));

    Router::new()
        .nest("/auth", auth_handlers::router(auth, jwt))
        .nest("/users", handlers::router(users, jwt))
}

fn token_for(jwt: &JwtAuth, role: Role) -> String {
    jwt.issue_pair(Uuid::now_v7(), "caller@example.com", role)
        .unwrap()
        .access_token
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_returns_201_with_tokens() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let data = TestDataBuilder::from_test_name("handler_register");
    let email = data.email("jane");

    let response = app(&db, &jwt)
        .oneshot(json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": email, "password": "secret123", "full_name": data.full_name("Jane") }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "user registered");
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
}

#[tokio::test]
async fn test_register_validates_input() {
    let db = TestDatabase::new().await;
    let jwt = jwt();

    let response = app(&db, &jwt)
        .oneshot(json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": "nope", "password": "123", "full_name": "Jane" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
    assert_eq!(db.count("users").await, 0);
}

#[tokio::test]
async fn test_duplicate_registration_is_400() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let email = TestDataBuilder::from_test_name("handler_dup").email("jane");
    let payload = json!({ "email": email, "password": "secret123", "full_name": "Jane" });

    let first = app(&db, &jwt)
        .oneshot(json_request("POST", "/auth/register", None, payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app(&db, &jwt)
        .oneshot(json_request("POST", "/auth/register", None, payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = json_body(second.into_body()).await;
    assert_eq!(body, json!({ "message": "email already exists" }));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let email = TestDataBuilder::from_test_name("handler_login").email("jane");

    app(&db, &jwt)
        .oneshot(json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": email, "password": "secret123", "full_name": "Jane" }),
        ))
        .await
        .unwrap();

    let response = app(&db, &jwt)
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            json!({ "email": email, "password": "wrong-one" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "invalid email or password");
}

#[tokio::test]
async fn test_refresh_and_logout_flow() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let email = TestDataBuilder::from_test_name("handler_refresh").email("jane");

    let registered = app(&db, &jwt)
        .oneshot(json_request(
            "POST",
            "/auth/register",
            None,
            json!({ "email": email, "password": "secret123", "full_name": "Jane" }),
        ))
        .await
        .unwrap();
    let tokens = json_body(registered.into_body()).await["data"].clone();
    let access = tokens["access_token"].as_str().unwrap();
    let refresh = tokens["refresh_token"].as_str().unwrap();

    // Refresh needs the caller's access token
    let anonymous = app(&db, &jwt)
        .oneshot(json_request(
            "POST",
            "/auth/refresh-token",
            None,
            json!({ "refresh_token": refresh }),
        ))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let refreshed = app(&db, &jwt)
        .oneshot(json_request(
            "POST",
            "/auth/refresh-token",
            Some(access),
            json!({ "refresh_token": refresh }),
        ))
        .await
        .unwrap();
    assert_eq!(refreshed.status(), StatusCode::OK);

    let logout = app(&db, &jwt)
        .oneshot(empty_request("GET", "/auth/logout", Some(access)))
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::OK);
    assert_eq!(db.count("auth_tokens").await, 0);
}

#[tokio::test]
async fn test_users_routes_require_staff() {
    let db = TestDatabase::new().await;
    let jwt = jwt();

    let anonymous = app(&db, &jwt)
        .oneshot(empty_request("GET", "/users", None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let customer = app(&db, &jwt)
        .oneshot(empty_request("GET", "/users", Some(&token_for(&jwt, Role::Customer))))
        .await
        .unwrap();
    assert_eq!(customer.status(), StatusCode::FORBIDDEN);

    let staff = app(&db, &jwt)
        .oneshot(empty_request("GET", "/users", Some(&token_for(&jwt, Role::Staff))))
        .await
        .unwrap();
    assert_eq!(staff.status(), StatusCode::OK);
    let body = json_body(staff.into_body()).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_user_paging_is_bounded() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let token = token_for(&jwt, Role::Staff);

    for uri in ["/users?offset=18446744073709551615", "/users?limit=101"] {
        let response = app(&db, &jwt)
            .oneshot(empty_request("GET", uri, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_delete_user_is_admin_only() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let user_id = db.create_test_user().await;
    let uri = format!("/users/{}", user_id);

    let staff = app(&db, &jwt)
        .oneshot(empty_request("DELETE", &uri, Some(&token_for(&jwt, Role::Staff))))
        .await
        .unwrap();
    assert_eq!(staff.status(), StatusCode::FORBIDDEN);

    let admin_token = token_for(&jwt, Role::Admin);
    let admin = app(&db, &jwt)
        .oneshot(empty_request("DELETE", &uri, Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::OK);

    let again = app(&db, &jwt)
        .oneshot(empty_request("DELETE", &uri, Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_user_with_bad_uuid_is_400() {
    let db = TestDatabase::new().await;
    let jwt = jwt();

    let response = app(&db, &jwt)
        .oneshot(empty_request(
            "GET",
            "/users/not-a-uuid",
            Some(&token_for(&jwt, Role::Staff)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_patch_is_rejected() {
    let db = TestDatabase::new().await;
    let jwt = jwt();
    let user_id = db.create_test_user().await;

    let response = app(&db, &jwt)
        .oneshot(json_request(
            "PATCH",
            &format!("/users/{}", user_id),
            Some(&token_for(&jwt, Role::Staff)),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "no fields to update");
}
