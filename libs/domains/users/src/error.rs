use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, TokenError};
use database::{DbErr, TimedOut};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("email already exists")]
    DuplicateEmail,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// Refresh token subject does not match the caller.
    #[error("invalid user token")]
    TokenOwnerMismatch,

    #[error("user token not found")]
    TokenNotFound,

    #[error("user token has expired")]
    TokenExpired,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Timeout(#[from] TimedOut),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound | UserError::TokenNotFound => AppError::NotFound(err.to_string()),
            UserError::DuplicateEmail
            | UserError::NoFieldsToUpdate
            | UserError::TokenOwnerMismatch => AppError::Conflict(err.to_string()),
            UserError::InvalidCredentials | UserError::TokenExpired => {
                AppError::Unauthorized(err.to_string())
            }
            UserError::Token(TokenError::Signing(msg)) => AppError::InternalServerError(msg),
            UserError::Token(e) => AppError::Unauthorized(e.to_string()),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Database(e) => AppError::Database(e),
            UserError::Timeout(_) => AppError::Timeout,
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
