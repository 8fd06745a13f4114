use axum_helpers::AuthUser;
use database::with_deadline;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{AddToCart, CartItem, CartLine};
use crate::repository::CartRepository;

/// The caller's own cart. There is no way to address another user's cart.
pub struct CartService<R: CartRepository> {
    repository: Arc<R>,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn add_item(&self, caller: &AuthUser, input: AddToCart) -> CartResult<CartItem> {
        with_deadline(self.repository.add(caller.user_id, input)).await
    }

    pub async fn get_cart(&self, caller: &AuthUser) -> CartResult<Vec<CartLine>> {
        with_deadline(self.repository.lines(caller.user_id)).await
    }

    pub async fn remove_item(&self, caller: &AuthUser, product_id: Uuid) -> CartResult<()> {
        if !with_deadline(self.repository.remove(caller.user_id, product_id)).await? {
            return Err(CartError::ItemNotFound);
        }
        Ok(())
    }

    /// Empty the cart; an already empty cart is reported as not found.
    pub async fn clear_cart(&self, caller: &AuthUser) -> CartResult<()> {
        let removed = with_deadline(self.repository.clear(caller.user_id)).await?;
        if removed == 0 {
            return Err(CartError::ItemNotFound);
        }
        tracing::info!(user_id = %caller.user_id, removed, "Cleared cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCartRepository;
    use axum_helpers::Role;

    fn caller() -> AuthUser {
        AuthUser {
            user_id: Uuid::now_v7(),
            email: "shopper@example.com".into(),
            role: Role::Customer,
        }
    }

    #[tokio::test]
    async fn test_operations_are_scoped_to_caller() {
        let me = caller();
        let my_id = me.user_id;
        let mut repo = MockCartRepository::new();
        repo.expect_lines()
            .withf(move |user_id| *user_id == my_id)
            .times(1)
            .returning(|_| Ok(vec![]));

        let lines = CartService::new(repo).get_cart(&me).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_clearing_empty_cart_is_not_found() {
        let mut repo = MockCartRepository::new();
        repo.expect_clear().returning(|_| Ok(0));

        let result = CartService::new(repo).clear_cart(&caller()).await;
        assert!(matches!(result, Err(CartError::ItemNotFound)));
    }

    #[tokio::test]
    async fn test_remove_missing_line() {
        let mut repo = MockCartRepository::new();
        repo.expect_remove().returning(|_, _| Ok(false));

        let result = CartService::new(repo)
            .remove_item(&caller(), Uuid::now_v7())
            .await;
        assert!(matches!(result, Err(CartError::ItemNotFound)));
    }
}
