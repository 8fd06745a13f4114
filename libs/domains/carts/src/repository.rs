use async_trait::async_trait;
use database::DatabaseTransaction;
use uuid::Uuid;

use crate::error::CartResult;
use crate::models::{AddToCart, CartItem, CartLine};

/// Repository trait for cart persistence. Every call is scoped to one user.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Insert the line or add to its quantity
    async fn add(&self, user_id: Uuid, input: AddToCart) -> CartResult<CartItem>;

    /// Lines joined with products, oldest first
    async fn lines(&self, user_id: Uuid) -> CartResult<Vec<CartLine>>;

    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> CartResult<bool>;

    /// Rows removed
    async fn clear(&self, user_id: Uuid) -> CartResult<u64>;

    async fn clear_in(&self, txn: &DatabaseTransaction, user_id: Uuid) -> CartResult<u64>;
}
