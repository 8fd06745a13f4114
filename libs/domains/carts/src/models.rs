use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One `carts` row: a product and its quantity in a user's cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Adding a product already in the cart increases its quantity.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddToCart {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "must be greater than zero"))]
    pub quantity: i32,
}

/// Cart row joined with the current product name and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct CartLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_price: f64,
    /// Units in the cart
    pub product_quantity: i32,
}

impl CartLine {
    pub fn sub_total(&self) -> f64 {
        self.product_price * f64::from(self.product_quantity)
    }
}

/// Sum of `price * quantity` over the lines
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::sub_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: i32) -> CartLine {
        CartLine {
            product_id: Uuid::now_v7(),
            product_name: "Mug".into(),
            product_price: price,
            product_quantity: quantity,
        }
    }

    #[test]
    fn test_total_sums_line_sub_totals() {
        let lines = vec![line(2.5, 4), line(10.0, 1)];
        assert_eq!(lines[0].sub_total(), 10.0);
        assert_eq!(cart_total(&lines), 20.0);
        assert_eq!(cart_total(&[]), 0.0);
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let input = AddToCart {
            product_id: Uuid::now_v7(),
            quantity: 0,
        };
        assert!(input.validate().is_err());
    }
}
