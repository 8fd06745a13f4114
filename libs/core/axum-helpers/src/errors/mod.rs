pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Error envelope returned by every endpoint.
///
/// Client errors (4xx) carry a `message`, optionally with field-level
/// `details` for validation failures. Server errors (5xx) carry only a
/// generic `error` string; the underlying cause is logged, never returned.
///
/// ```json
/// { "message": "email already exists" }
/// { "error": "internal server error" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorResponse {
    Client {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<serde_json::Value>,
    },
    Server {
        error: String,
    },
}

impl ErrorResponse {
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
            details: None,
        }
    }

    pub fn server(error: impl Into<String>) -> Self {
        Self::Server {
            error: error.into(),
        }
    }

    /// The human-readable text, whichever shape the envelope has.
    pub fn text(&self) -> &str {
        match self {
            Self::Client { message, .. } => message,
            Self::Server { error } => error,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates define their own error enums and convert into this one at
/// the handler boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Business conflicts (duplicate email, empty cart, out of stock) are
    /// reported to clients as 400 with the conflict text.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Status code and error code for this variant.
    pub fn status(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::JsonExtractorRejection(_) => (StatusCode::BAD_REQUEST, ErrorCode::JsonExtraction),
            AppError::QueryExtractorRejection(_) | AppError::ValidationError(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError)
            }
            AppError::PathExtractorRejection(_) | AppError::InvalidUuid(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidUuid)
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, ErrorCode::Conflict),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
            AppError::Timeout => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Timeout),
            AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ServiceUnavailable)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        let body = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), "JSON extraction error: {:?}", e);
                ErrorResponse::client(e.body_text())
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::info!(error_code = code.code(), "Query extraction error: {:?}", e);
                ErrorResponse::client(e.body_text())
            }
            AppError::PathExtractorRejection(e) => {
                tracing::info!(error_code = code.code(), "Path extraction error: {:?}", e);
                ErrorResponse::client(code.default_message())
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code.code(), "Validation error: {:?}", e);
                ErrorResponse::Client {
                    message: code.default_message().to_string(),
                    details: Some(validation_details(&e)),
                }
            }
            AppError::InvalidUuid(raw) => {
                tracing::info!(error_code = code.code(), "Invalid UUID: {}", raw);
                ErrorResponse::client(format!("invalid UUID: {}", raw))
            }
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => {
                tracing::info!(error_code = code.code(), status = status.as_u16(), "{}", msg);
                ErrorResponse::client(msg)
            }
            AppError::Database(e) => {
                tracing::error!(error_code = code.code(), "Database error: {:?}", e);
                ErrorResponse::server(code.default_message())
            }
            AppError::Timeout => {
                tracing::warn!(error_code = code.code(), "Request timed out");
                ErrorResponse::server(code.default_message())
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                ErrorResponse::server(code.default_message())
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                ErrorResponse::server(msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten validator errors into `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::json!(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}
