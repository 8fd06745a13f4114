//! Error codes attached to structured log lines.
//!
//! Clients only see the JSON envelope; the integer code is written to the
//! `error_code` log field so failures can be grouped in log search.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body or query failed validation
    ValidationError,
    /// Malformed UUID in a path segment
    InvalidUuid,
    /// Request body could not be read as JSON
    JsonExtraction,
    NotFound,
    /// Business rule rejected the request
    BadRequest,
    Unauthorized,
    Forbidden,
    /// Request conflicts with stored state (duplicate email and similar)
    Conflict,

    // Server errors
    InternalError,
    ServiceUnavailable,
    /// Service call exceeded its deadline
    Timeout,

    // Database errors (2000-2999)
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: client and application errors
    /// - 2000-2999: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::BadRequest => 1009,
            Self::ServiceUnavailable => 1011,
            Self::Timeout => 1012,
            Self::DatabaseError => 2003,
        }
    }

    /// Message used when the error carries no text of its own.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "request validation failed",
            Self::InvalidUuid => "invalid UUID format",
            Self::JsonExtraction => "failed to parse request body",
            Self::NotFound => "resource not found",
            Self::BadRequest => "bad request",
            Self::Unauthorized => "authentication required",
            Self::Forbidden => "access forbidden",
            Self::Conflict => "resource already exists",
            Self::InternalError => "internal server error",
            Self::ServiceUnavailable => "service is temporarily unavailable",
            Self::Timeout => "request timed out",
            Self::DatabaseError => "internal server error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
