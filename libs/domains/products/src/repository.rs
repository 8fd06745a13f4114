use async_trait::async_trait;
use database::DatabaseTransaction;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{AssignedCategory, CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>>;

    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// `stock = stock + quantity`, refused when the result would be negative
    async fn add_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>>;

    /// Take `quantity` units inside `txn`; false when stock is short
    async fn deduct_stock_in(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        quantity: i32,
    ) -> ProductResult<bool>;

    /// Link categories; links that already exist are kept
    async fn assign_categories(&self, product_id: Uuid, category_ids: Vec<Uuid>) -> ProductResult<()>;

    async fn list_categories(&self, product_id: Uuid) -> ProductResult<Vec<AssignedCategory>>;

    async fn unassign_category(&self, product_id: Uuid, category_id: Uuid) -> ProductResult<bool>;
}
