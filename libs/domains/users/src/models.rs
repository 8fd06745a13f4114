use axum_helpers::Role;
use chrono::{DateTime, Utc};
use database::MAX_OFFSET;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Smallest page the user listing will return.
pub const MIN_PAGE_SIZE: u64 = 10;

/// User entity - matches the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a user, shared by `POST /users` and `POST /auth/register`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "is required"))]
    pub full_name: String,

    /// Defaults to `customer`; ignored on self-registration
    #[serde(default)]
    pub role: Option<Role>,
}

/// Row ready for insertion; the password is already hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRole {
    pub role: Role,
}

/// Query parameters for listing users
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    /// Page size, raised to 10 when smaller
    #[validate(range(max = 100))]
    pub limit: Option<u64>,
    #[validate(range(max = MAX_OFFSET))]
    #[serde(default)]
    pub offset: u64,
}

impl UserFilter {
    pub fn page_size(&self) -> u64 {
        self.limit.unwrap_or(MIN_PAGE_SIZE).max(MIN_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub refresh_token: String,
}

/// Stored refresh token; `refresh_token` holds the SHA-256 digest.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthToken {
    pub user_id: Uuid,
    pub refresh_token: String,
    pub expired_at: DateTime<Utc>,
}
