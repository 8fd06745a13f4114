use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    async fn list(&self) -> CategoryResult<Vec<Category>>;

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Option<Category>>;

    async fn delete(&self, id: Uuid) -> CategoryResult<bool>;
}
