use async_trait::async_trait;
use database::DatabaseTransaction;
use uuid::Uuid;

use crate::error::AddressResult;
use crate::models::{Address, CreateAddress, UpdateAddress};

/// Repository trait for Address persistence
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, input: CreateAddress) -> AddressResult<Address>;

    async fn get_by_id(&self, id: Uuid) -> AddressResult<Option<Address>>;

    /// A user's addresses, newest first
    async fn list_by_user(&self, user_id: Uuid) -> AddressResult<Vec<Address>>;

    async fn update(&self, id: Uuid, input: UpdateAddress) -> AddressResult<Option<Address>>;

    async fn delete(&self, id: Uuid) -> AddressResult<bool>;

    /// Clear the default flag on every address of the user
    async fn clear_default_in(&self, txn: &DatabaseTransaction, user_id: Uuid) -> AddressResult<()>;

    /// Flag one address as default and return it; `None` when it is not the user's
    async fn mark_default_in(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        user_id: Uuid,
    ) -> AddressResult<Option<Address>>;
}
