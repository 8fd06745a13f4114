use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Shipping address - matches the `addresses` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New addresses belong to the caller and start as non-default.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAddress {
    #[validate(length(min = 1, message = "is required"))]
    pub address_line: String,

    #[validate(length(min = 1, message = "is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "is required"))]
    pub state: String,

    #[validate(length(min = 5, message = "must be at least 5 characters"))]
    pub postal_code: String,

    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub phone: String,
}

/// Partial update; the default flag has its own endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAddress {
    #[validate(length(min = 1))]
    pub address_line: Option<String>,

    #[validate(length(min = 1))]
    pub city: Option<String>,

    #[validate(length(min = 1))]
    pub state: Option<String>,

    #[validate(length(min = 5, message = "must be at least 5 characters"))]
    pub postal_code: Option<String>,

    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub phone: Option<String>,
}

impl UpdateAddress {
    pub fn is_empty(&self) -> bool {
        self.address_line.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
            && self.phone.is_none()
    }
}
