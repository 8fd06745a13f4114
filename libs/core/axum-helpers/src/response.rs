//! Success envelope shared by every endpoint.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"message": "...", "data": ...}`
///
/// Endpoints with nothing to return use `ApiResponse<()>`, which renders
/// `data` as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

/// Handler return type for enveloped responses.
pub type Envelope<T> = (StatusCode, Json<ApiResponse<T>>);

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// 200 with the success envelope.
pub fn ok<T>(message: impl Into<String>, data: T) -> Envelope<T> {
    (StatusCode::OK, Json(ApiResponse::new(message, data)))
}

/// 201 with the success envelope.
pub fn created<T>(message: impl Into<String>, data: T) -> Envelope<T> {
    (StatusCode::CREATED, Json(ApiResponse::new(message, data)))
}
