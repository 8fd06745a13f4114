use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::{DbErr, TimedOut};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    /// `category_id` on create/update points nowhere.
    #[error("category not found")]
    CategoryNotFound,

    /// Order items still reference the product.
    #[error("product is referenced by existing orders")]
    InUse,

    #[error("product or category not found")]
    LinkNotFound,

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound | ProductError::LinkNotFound | ProductError::CategoryNotFound => {
                AppError::NotFound(err.to_string())
            }
            ProductError::NoFieldsToUpdate | ProductError::InvalidQuantity | ProductError::InUse => {
                AppError::Conflict(err.to_string())
            }
            ProductError::Database(e) => AppError::Database(e),
            ProductError::Timeout(_) => AppError::Timeout,
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductError::NotFound, StatusCode::NOT_FOUND),
            (ProductError::LinkNotFound, StatusCode::NOT_FOUND),
            (ProductError::InvalidQuantity, StatusCode::BAD_REQUEST),
            (ProductError::InUse, StatusCode::BAD_REQUEST),
            (
                ProductError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
