use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product category - matches the `categories` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_is_rejected() {
        let input = CreateCategory {
            name: "ab".into(),
            description: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_description_is_optional() {
        let input: CreateCategory = serde_json::from_str(r#"{"name":"books"}"#).unwrap();
        assert!(input.validate().is_ok());
        assert!(input.description.is_none());
    }

    #[test]
    fn test_update_emptiness() {
        assert!(UpdateCategory::default().is_empty());
        let update = UpdateCategory {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
