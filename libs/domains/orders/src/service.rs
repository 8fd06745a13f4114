//! Checkout and order management.
//!
//! Checkout reads the cart and the address first, so an empty cart or a bad
//! address fails before anything is written. Everything after that runs in
//! one transaction:
//!
//! ```text
//! insert order ─► snapshot address ─► deduct stock per line ─► insert items ─► clear cart
//! ```
//!
//! A line whose stock is short aborts the transaction, leaving stock, cart
//! and orders exactly as they were.

use axum_helpers::AuthUser;
use database::{DatabaseConnection, with_deadline, with_transaction};
use domain_addresses::AddressRepository;
use domain_carts::{CartRepository, cart_total};
use domain_products::ProductRepository;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, NewOrder, NewOrderItem, Order, OrderDetail, OrderFilter, OrderStatus, OrderSummary,
};
use crate::repository::OrderRepository;

pub struct OrderService<O, C, A, P> {
    orders: Arc<O>,
    carts: Arc<C>,
    addresses: Arc<A>,
    products: Arc<P>,
    db: DatabaseConnection,
}

impl<O, C, A, P> OrderService<O, C, A, P>
where
    O: OrderRepository + 'static,
    C: CartRepository + 'static,
    A: AddressRepository + 'static,
    P: ProductRepository + 'static,
{
    pub fn new(orders: O, carts: C, addresses: A, products: P, db: DatabaseConnection) -> Self {
        Self {
            orders: Arc::new(orders),
            carts: Arc::new(carts),
            addresses: Arc::new(addresses),
            products: Arc::new(products),
            db,
        }
    }

    /// Turn the caller's cart into a pending order shipped to `address_id`.
    pub async fn create_order(&self, caller: &AuthUser, input: CreateOrder) -> OrderResult<OrderDetail> {
        let user_id = caller.user_id;

        with_deadline(async {
            let lines = self.carts.lines(user_id).await?;
            if lines.is_empty() {
                return Err(OrderError::CartEmpty);
            }

            let address = self
                .addresses
                .get_by_id(input.address_id)
                .await?
                .filter(|address| address.user_id == user_id)
                .ok_or(OrderError::AddressNotFound)?;

            let draft = NewOrder {
                id: Uuid::now_v7(),
                user_id,
                address_id: address.id,
                total_price: cart_total(&lines),
            };

            let orders = Arc::clone(&self.orders);
            let carts = Arc::clone(&self.carts);
            let products = Arc::clone(&self.products);

            let detail = with_transaction(&self.db, move |txn| {
                Box::pin(async move {
                    let order = orders.insert_order_in(txn, draft).await?;
                    let snapshot = orders.insert_address_in(txn, order.id, address).await?;

                    let mut items = Vec::with_capacity(lines.len());
                    for line in &lines {
                        if !products
                            .deduct_stock_in(txn, line.product_id, line.product_quantity)
                            .await?
                        {
                            return Err(OrderError::OutOfStock {
                                product_id: line.product_id,
                            });
                        }
                        items.push(NewOrderItem {
                            product_id: line.product_id,
                            quantity: line.product_quantity,
                            price: line.product_price,
                        });
                    }

                    let items = orders.insert_items_in(txn, order.id, items).await?;
                    carts.clear_in(txn, user_id).await?;

                    Ok(OrderDetail {
                        order,
                        items,
                        address: snapshot,
                    })
                })
            })
            .await?;

            tracing::info!(
                order_id = %detail.order.id,
                user_id = %user_id,
                items = detail.items.len(),
                total = detail.order.total_price,
                "Created order"
            );
            Ok(detail)
        })
        .await
    }

    /// Customers only see their own orders, whatever `user_id` they ask for.
    pub async fn list_orders(
        &self,
        caller: &AuthUser,
        mut filter: OrderFilter,
    ) -> OrderResult<Vec<OrderSummary>> {
        if !caller.role.is_privileged() {
            filter.user_id = Some(caller.user_id);
        }
        with_deadline(self.orders.list(filter)).await
    }

    pub async fn get_order(&self, caller: &AuthUser, id: Uuid) -> OrderResult<OrderDetail> {
        with_deadline(async {
            let order = self.orders.get_by_id(id).await?.ok_or(OrderError::NotFound)?;
            if order.user_id != caller.user_id && !caller.role.is_privileged() {
                return Err(OrderError::Forbidden);
            }

            let items = self.orders.items(id).await?;
            let address = self.orders.address(id).await?.ok_or(OrderError::NotFound)?;
            Ok(OrderDetail {
                order,
                items,
                address,
            })
        })
        .await
    }

    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> OrderResult<Order> {
        let order = with_deadline(self.orders.update_status(id, status))
            .await?
            .ok_or(OrderError::NotFound)?;
        tracing::info!(order_id = %id, status = %status, "Updated order status");
        Ok(order)
    }
}
