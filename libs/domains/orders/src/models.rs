use chrono::{DateTime, Utc};
use database::MAX_OFFSET;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle. Stored as lowercase text.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

/// Order header - matches the `orders` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Address chosen at checkout; see the snapshot for what was shipped to
    pub address_id: Uuid,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price and quantity as they were at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: f64,
    pub sub_total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Copy of the shipping address taken at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, FromQueryResult)]
pub struct OrderAddress {
    pub id: Uuid,
    pub order_id: Uuid,
    pub address_id: Uuid,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
}

/// An order with its items and address snapshot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub address: OrderAddress,
}

/// Row of the order listing, joined with the buyer and the address snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub total_price: f64,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Checkout request: ship the caller's cart to one of their addresses.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    pub address_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

/// Query filters for listing orders. Customers only ever see their own.
#[derive(Debug, Clone, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,

    /// Staff and admins only; ignored for customers
    pub user_id: Option<Uuid>,

    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u64,

    #[validate(range(max = MAX_OFFSET))]
    #[serde(default)]
    pub offset: u64,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            user_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

fn default_limit() -> u64 {
    10
}

/// Order header to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_id: Uuid,
    pub total_price: f64,
}

/// Item to insert, priced from the cart line
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: f64,
}

impl NewOrderItem {
    pub fn sub_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trips_as_lowercase() {
        assert_eq!(OrderStatus::Shipped.to_string(), "shipped");
        assert_eq!(OrderStatus::from_str("cancelled").unwrap(), OrderStatus::Cancelled);
        assert!(OrderStatus::from_str("lost").is_err());
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_filter_defaults() {
        let filter: OrderFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.offset, 0);
        assert!(filter.status.is_none());

        let filter: OrderFilter = serde_json::from_str(r#"{"status":"paid","limit":0}"#).unwrap();
        assert_eq!(filter.status, Some(OrderStatus::Paid));
        assert!(filter.validate().is_err());

        let filter: OrderFilter =
            serde_json::from_str(r#"{"offset":18446744073709551615}"#).unwrap();
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_item_sub_total() {
        let item = NewOrderItem {
            product_id: Uuid::now_v7(),
            quantity: 3,
            price: 2.5,
        };
        assert_eq!(item.sub_total(), 7.5);
    }
}
