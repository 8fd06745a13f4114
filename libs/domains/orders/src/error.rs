use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::{DbErr, TimedOut};
use domain_addresses::AddressError;
use domain_carts::CartError;
use domain_products::ProductError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found")]
    NotFound,

    #[error("cart is empty")]
    CartEmpty,

    /// Missing, or owned by someone other than the buyer.
    #[error("address not found")]
    AddressNotFound,

    #[error("product {product_id} is out of stock")]
    OutOfStock { product_id: Uuid },

    #[error("order belongs to another user")]
    Forbidden,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound | OrderError::AddressNotFound => AppError::NotFound(err.to_string()),
            OrderError::CartEmpty | OrderError::OutOfStock { .. } => {
                AppError::Conflict(err.to_string())
            }
            OrderError::Forbidden => AppError::Forbidden(err.to_string()),
            OrderError::Cart(e) => e.into(),
            OrderError::Address(e) => e.into(),
            OrderError::Product(e) => e.into(),
            OrderError::Database(e) => AppError::Database(e),
            OrderError::Timeout(_) => AppError::Timeout,
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_checkout_failures_are_client_errors() {
        assert_eq!(OrderError::CartEmpty.into_response().status(), StatusCode::BAD_REQUEST);
        let out = OrderError::OutOfStock {
            product_id: Uuid::nil(),
        };
        assert_eq!(
            out.to_string(),
            "product 00000000-0000-0000-0000-000000000000 is out of stock"
        );
        assert_eq!(out.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_wrapped_errors_keep_their_status() {
        let err = OrderError::from(CartError::ItemNotFound);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = OrderError::from(DbErr::Custom("boom".into()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
