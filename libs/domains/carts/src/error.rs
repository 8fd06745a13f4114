use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::{DbErr, TimedOut};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart item not found")]
    ItemNotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ItemNotFound | CartError::ProductNotFound => {
                AppError::NotFound(err.to_string())
            }
            CartError::Database(e) => AppError::Database(e),
            CartError::Timeout(_) => AppError::Timeout,
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
