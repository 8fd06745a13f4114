use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::{DbErr, TimedOut};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address not found")]
    NotFound,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// A customer touched someone else's address.
    #[error("address belongs to another user")]
    Forbidden,

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

pub type AddressResult<T> = Result<T, AddressError>;

impl From<AddressError> for AppError {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::NotFound => AppError::NotFound(err.to_string()),
            AddressError::NoFieldsToUpdate => AppError::Conflict(err.to_string()),
            AddressError::Forbidden => AppError::Forbidden(err.to_string()),
            AddressError::Database(e) => AppError::Database(e),
            AddressError::Timeout(_) => AppError::Timeout,
        }
    }
}

impl IntoResponse for AddressError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
