use axum_helpers::AuthUser;
use database::{DatabaseConnection, with_deadline, with_transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AddressError, AddressResult};
use crate::models::{Address, CreateAddress, UpdateAddress};
use crate::repository::AddressRepository;

/// Address book operations.
///
/// Customers may only read and change their own addresses; staff and admins
/// may act on any user's.
pub struct AddressService<R: AddressRepository> {
    repository: Arc<R>,
    db: DatabaseConnection,
}

impl<R: AddressRepository + 'static> AddressService<R> {
    pub fn new(repository: R, db: DatabaseConnection) -> Self {
        Self {
            repository: Arc::new(repository),
            db,
        }
    }

    pub async fn create_address(&self, caller: &AuthUser, input: CreateAddress) -> AddressResult<Address> {
        with_deadline(self.repository.create(caller.user_id, input)).await
    }

    pub async fn get_address(&self, caller: &AuthUser, id: Uuid) -> AddressResult<Address> {
        with_deadline(self.owned(caller, id)).await
    }

    pub async fn list_addresses(&self, caller: &AuthUser, user_id: Uuid) -> AddressResult<Vec<Address>> {
        ensure_access(caller, user_id)?;
        with_deadline(self.repository.list_by_user(user_id)).await
    }

    pub async fn update_address(
        &self,
        caller: &AuthUser,
        id: Uuid,
        input: UpdateAddress,
    ) -> AddressResult<Address> {
        if input.is_empty() {
            return Err(AddressError::NoFieldsToUpdate);
        }

        with_deadline(async {
            self.owned(caller, id).await?;
            self.repository
                .update(id, input)
                .await?
                .ok_or(AddressError::NotFound)
        })
        .await
    }

    pub async fn delete_address(&self, caller: &AuthUser, id: Uuid) -> AddressResult<()> {
        with_deadline(async {
            self.owned(caller, id).await?;
            if !self.repository.delete(id).await? {
                return Err(AddressError::NotFound);
            }
            tracing::info!(address_id = %id, "Deleted address");
            Ok(())
        })
        .await
    }

    /// Make `id` the owner's only default address.
    pub async fn set_default(&self, caller: &AuthUser, id: Uuid) -> AddressResult<Address> {
        with_deadline(async {
            let address = self.owned(caller, id).await?;
            let owner = address.user_id;
            let repository = Arc::clone(&self.repository);

            let updated = with_transaction(&self.db, move |txn| {
                Box::pin(async move {
                    repository.clear_default_in(txn, owner).await?;
                    repository
                        .mark_default_in(txn, id, owner)
                        .await?
                        .ok_or(AddressError::NotFound)
                })
            })
            .await?;

            tracing::info!(address_id = %id, user_id = %owner, "Set default address");
            Ok(updated)
        })
        .await
    }

    async fn owned(&self, caller: &AuthUser, id: Uuid) -> AddressResult<Address> {
        let address = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(AddressError::NotFound)?;
        ensure_access(caller, address.user_id)?;
        Ok(address)
    }
}

fn ensure_access(caller: &AuthUser, owner: Uuid) -> AddressResult<()> {
    if caller.user_id == owner || caller.role.is_privileged() {
        Ok(())
    } else {
        Err(AddressError::Forbidden)
    }
}
