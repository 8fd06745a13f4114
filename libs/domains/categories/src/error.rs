use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::{DbErr, TimedOut};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("category not found")]
    NotFound,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// Products still point at the category.
    #[error("category is still in use by products")]
    InUse,

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound => AppError::NotFound(err.to_string()),
            CategoryError::NoFieldsToUpdate | CategoryError::InUse => {
                AppError::Conflict(err.to_string())
            }
            CategoryError::Database(e) => AppError::Database(e),
            CategoryError::Timeout(_) => AppError::Timeout,
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
