use async_trait::async_trait;
use database::DatabaseTransaction;
use domain_addresses::Address;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{
    NewOrder, NewOrderItem, Order, OrderAddress, OrderFilter, OrderItem, OrderStatus, OrderSummary,
};

/// Repository trait for orders and their snapshots
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert_order_in(&self, txn: &DatabaseTransaction, order: NewOrder) -> OrderResult<Order>;

    /// Copy `address` into `order_addresses`
    async fn insert_address_in(
        &self,
        txn: &DatabaseTransaction,
        order_id: Uuid,
        address: Address,
    ) -> OrderResult<OrderAddress>;

    async fn insert_items_in(
        &self,
        txn: &DatabaseTransaction,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> OrderResult<Vec<OrderItem>>;

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    async fn items(&self, order_id: Uuid) -> OrderResult<Vec<OrderItem>>;

    async fn address(&self, order_id: Uuid) -> OrderResult<Option<OrderAddress>>;

    /// Newest first
    async fn list(&self, filter: OrderFilter) -> OrderResult<Vec<OrderSummary>>;

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> OrderResult<Option<Order>>;
}
