//! UUID path parameter extractors.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Single UUID path parameter, rejected with the JSON envelope when malformed.
///
/// ```ignore
/// async fn get_user(UuidPath(id): UuidPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse(&raw).map(UuidPath)
    }
}

/// Two UUID path parameters in route order, e.g.
/// `/products/{product_id}/categories/{category_id}`.
pub struct UuidPathPair(pub Uuid, pub Uuid);

impl<S> FromRequestParts<S> for UuidPathPair
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)) = Path::<(String, String)>::from_request_parts(parts, state).await?;
        Ok(UuidPathPair(parse(&first)?, parse(&second)?))
    }
}

fn parse(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidUuid(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(|UuidPath(id): UuidPath| async move { id.to_string() }))
            .route(
                "/items/{a}/links/{b}",
                get(|UuidPathPair(a, b): UuidPathPair| async move { format!("{a}:{b}") }),
            )
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_uuid() {
        let id = Uuid::now_v7();
        assert_eq!(status_of(&format!("/items/{id}")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_bad_request() {
        assert_eq!(status_of("/items/not-a-uuid").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pair() {
        let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
        assert_eq!(status_of(&format!("/items/{a}/links/{b}")).await, StatusCode::OK);
        assert_eq!(
            status_of(&format!("/items/{a}/links/xyz")).await,
            StatusCode::BAD_REQUEST
        );
    }
}
