use super::claims::{AuthUser, Role};
use super::jwt::{JwtAuth, TokenError};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware.
///
/// Verifies the bearer access token and inserts an [`AuthUser`] into the
/// request extensions. Missing, malformed and expired tokens answer 401.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/cart", get(get_cart))
///     .layer(axum::middleware::from_fn_with_state(jwt.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err(AppError::Unauthorized("missing bearer token".to_string()));
    };

    let claims = auth.verify_access(token).map_err(|e| match e {
        TokenError::Expired => AppError::Unauthorized("token has expired".to_string()),
        _ => AppError::Unauthorized("invalid token".to_string()),
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Role gate. Must sit inside [`jwt_auth_middleware`].
///
/// ```ignore
/// Router::new()
///     .route("/products", post(create_product))
///     .layer(axum::middleware::from_fn_with_state(STAFF_OR_ADMIN, require_roles))
///     .layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
/// ```
pub async fn require_roles(
    State(allowed): State<&'static [Role]>,
    user: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !allowed.contains(&user.role) {
        tracing::info!(user_id = %user.user_id, role = %user.role, "Role not allowed");
        return Err(AppError::Forbidden("insufficient role".to_string()));
    }
    Ok(next.run(request).await)
}
