use chrono::{DateTime, Utc};
use database::MAX_OFFSET;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Catalog product - matches the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct Product {
    pub id: Uuid,
    /// Primary category
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    pub category_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(exclusive_min = 0.0, message = "must be greater than zero"))]
    pub price: f64,

    #[validate(range(min = 0, message = "cannot be negative"))]
    #[serde(default)]
    pub stock: i32,

    #[serde(default)]
    pub image_url: String,
}

/// DTO for a partial product update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub category_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(exclusive_min = 0.0, message = "must be greater than zero"))]
    pub price: Option<f64>,

    #[validate(range(min = 0, message = "cannot be negative"))]
    pub stock: Option<i32>,

    pub image_url: Option<String>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image_url.is_none()
    }
}

/// Sortable columns. The variant text is the column name, so only these
/// ever reach `ORDER BY`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, AsRefStr, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductOrderBy {
    #[default]
    Id,
    Name,
    Price,
    Stock,
    CreatedAt,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, AsRefStr, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Query filters for listing products
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Only products whose primary category is this one
    pub category_id: Option<Uuid>,

    #[serde(default)]
    pub order_by: ProductOrderBy,

    #[serde(default)]
    pub sort: SortDirection,

    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u64,

    #[validate(range(max = MAX_OFFSET))]
    #[serde(default)]
    pub offset: u64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            order_by: ProductOrderBy::default(),
            sort: SortDirection::default(),
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u64 {
    10
}

/// Stock top-up
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddStock {
    #[validate(range(min = 1, message = "must be greater than zero"))]
    pub quantity: i32,
}

/// Extra categories to link to a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignCategories {
    #[validate(length(min = 1, message = "at least one category is required"))]
    pub category_ids: Vec<Uuid>,
}

/// A category linked through `product_categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct AssignedCategory {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_filter_defaults() {
        let filter: ProductFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.order_by, ProductOrderBy::Id);
        assert_eq!(filter.sort, SortDirection::Desc);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn test_order_by_maps_to_columns() {
        assert_eq!(ProductOrderBy::CreatedAt.as_ref(), "created_at");
        assert_eq!(ProductOrderBy::Price.as_ref(), "price");
        assert_eq!(SortDirection::Asc.as_ref(), "ASC");
        assert_eq!(SortDirection::from_str("desc").unwrap(), SortDirection::Desc);
    }

    #[test]
    fn test_offset_must_fit_bigint() {
        let filter = ProductFilter {
            offset: MAX_OFFSET + 1,
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_unknown_order_by_is_rejected() {
        let result: Result<ProductFilter, _> =
            serde_json::from_str(r#"{"order_by":"password_hash"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_price_must_be_positive() {
        let input = CreateProduct {
            category_id: Uuid::now_v7(),
            name: "Lamp".into(),
            description: String::new(),
            price: 0.0,
            stock: -1,
            image_url: String::new(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn test_update_emptiness() {
        assert!(UpdateProduct::default().is_empty());
        let update = UpdateProduct {
            price: Some(9.5),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
