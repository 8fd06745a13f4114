use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, AuthUser, Envelope, JwtAuth, TokenPair, ValidatedJson, authenticated, created,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    ok,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth::AuthService;
use crate::error::UserResult;
use crate::models::{CreateUser, LoginRequest, RefreshTokenRequest};
use crate::repository::{AuthTokenRepository, UserRepository};

pub const TAG: &str = "auth";

/// OpenAPI documentation for authentication
#[derive(OpenApi)]
#[openapi(
    paths(register, login, refresh_token, logout),
    components(
        schemas(TokenPair, LoginRequest, RefreshTokenRequest),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Registration, login and token rotation"))
)]
pub struct AuthApiDoc;

/// `/register` and `/login` are public; `/refresh-token` and `/logout`
/// need a valid access token.
pub fn router<U, T>(service: AuthService<U, T>, jwt: &JwtAuth) -> Router
where
    U: UserRepository + 'static,
    T: AuthTokenRepository + 'static,
{
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh-token", authenticated(post(refresh_token), jwt))
        .route("/logout", authenticated(get(logout), jwt))
        .with_state(Arc::new(service))
}

/// Create a customer account
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "Registered; tokens issued", body = ApiResponse<TokenPair>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<U: UserRepository + 'static, T: AuthTokenRepository + 'static>(
    State(service): State<Arc<AuthService<U, T>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<Envelope<TokenPair>> {
    let tokens = service.register(input).await?;
    Ok(created("user registered", tokens))
}

/// Exchange credentials for tokens
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens issued", body = ApiResponse<TokenPair>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<U: UserRepository + 'static, T: AuthTokenRepository + 'static>(
    State(service): State<Arc<AuthService<U, T>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Envelope<TokenPair>> {
    let tokens = service.login(input).await?;
    Ok(ok("login successful", tokens))
}

/// Rotate the caller's refresh token
#[utoipa::path(
    post,
    path = "/refresh-token",
    tag = TAG,
    request_body = RefreshTokenRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New token pair", body = ApiResponse<TokenPair>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn refresh_token<U: UserRepository + 'static, T: AuthTokenRepository + 'static>(
    State(service): State<Arc<AuthService<U, T>>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<RefreshTokenRequest>,
) -> UserResult<Envelope<TokenPair>> {
    let tokens = service.refresh(user.user_id, &input.refresh_token).await?;
    Ok(ok("token refreshed", tokens))
}

/// Revoke the caller's refresh token
#[utoipa::path(
    get,
    path = "/logout",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn logout<U: UserRepository + 'static, T: AuthTokenRepository + 'static>(
    State(service): State<Arc<AuthService<U, T>>>,
    user: AuthUser,
) -> UserResult<Envelope<()>> {
    service.logout(user.user_id).await?;
    Ok(ok("logged out", ()))
}
