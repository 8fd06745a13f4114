//! Product Service - catalog rules on top of the repository

use database::with_deadline;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    AssignedCategory, CreateProduct, Product, ProductFilter, UpdateProduct,
};
use crate::repository::ProductRepository;

pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        with_deadline(self.repository.create(input)).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        with_deadline(self.repository.get_by_id(id))
            .await?
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        with_deadline(self.repository.list(filter)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        if input.is_empty() {
            return Err(ProductError::NoFieldsToUpdate);
        }

        with_deadline(self.repository.update(id, input))
            .await?
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !with_deadline(self.repository.delete(id)).await? {
            return Err(ProductError::NotFound);
        }
        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    /// Top up stock. Only positive quantities are accepted here; orders
    /// take stock through [`ProductRepository::deduct_stock_in`].
    #[instrument(skip(self))]
    pub async fn add_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Product> {
        if quantity <= 0 {
            return Err(ProductError::InvalidQuantity);
        }

        let product = with_deadline(self.repository.add_stock(id, quantity))
            .await?
            .ok_or(ProductError::NotFound)?;
        tracing::info!(product_id = %id, added = quantity, stock = product.stock, "Added stock");
        Ok(product)
    }

    #[instrument(skip(self, category_ids), fields(count = category_ids.len()))]
    pub async fn assign_categories(
        &self,
        product_id: Uuid,
        category_ids: Vec<Uuid>,
    ) -> ProductResult<Vec<AssignedCategory>> {
        with_deadline(async {
            if self.repository.get_by_id(product_id).await?.is_none() {
                return Err(ProductError::NotFound);
            }
            self.repository
                .assign_categories(product_id, category_ids)
                .await?;
            self.repository.list_categories(product_id).await
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self, product_id: Uuid) -> ProductResult<Vec<AssignedCategory>> {
        with_deadline(async {
            if self.repository.get_by_id(product_id).await?.is_none() {
                return Err(ProductError::NotFound);
            }
            self.repository.list_categories(product_id).await
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn unassign_category(&self, product_id: Uuid, category_id: Uuid) -> ProductResult<()> {
        if !with_deadline(self.repository.unassign_category(product_id, category_id)).await? {
            return Err(ProductError::LinkNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;

    fn product(id: Uuid, stock: i32) -> Product {
        Product {
            id,
            category_id: Uuid::now_v7(),
            name: "Desk lamp".into(),
            description: String::new(),
            price: 24.99,
            stock,
            image_url: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let result = ProductService::new(repo).get_product(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_add_stock_rejects_non_positive() {
        let mut repo = MockProductRepository::new();
        repo.expect_add_stock().never();
        let service = ProductService::new(repo);

        for quantity in [0, -5] {
            let result = service.add_stock(Uuid::now_v7(), quantity).await;
            assert!(matches!(result, Err(ProductError::InvalidQuantity)));
        }
    }

    #[tokio::test]
    async fn test_add_stock_returns_new_level() {
        let mut repo = MockProductRepository::new();
        repo.expect_add_stock()
            .withf(|_, quantity| *quantity == 3)
            .times(1)
            .returning(|id, quantity| Ok(Some(product(id, 2 + quantity))));

        let updated = ProductService::new(repo)
            .add_stock(Uuid::now_v7(), 3)
            .await
            .unwrap();
        assert_eq!(updated.stock, 5);
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let result = ProductService::new(repo)
            .update_product(Uuid::now_v7(), UpdateProduct::default())
            .await;
        assert!(matches!(result, Err(ProductError::NoFieldsToUpdate)));
    }

    #[tokio::test]
    async fn test_unassign_missing_link() {
        let mut repo = MockProductRepository::new();
        repo.expect_unassign_category().returning(|_, _| Ok(false));

        let result = ProductService::new(repo)
            .unassign_category(Uuid::now_v7(), Uuid::now_v7())
            .await;
        assert!(matches!(result, Err(ProductError::LinkNotFound)));
    }

    #[tokio::test]
    async fn test_list_categories_of_missing_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_list_categories().never();

        let result = ProductService::new(repo).list_categories(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_assign_to_missing_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_assign_categories().never();
        repo.expect_list_categories().never();

        let result = ProductService::new(repo)
            .assign_categories(Uuid::now_v7(), Vec::new())
            .await;
        assert!(matches!(result, Err(ProductError::NotFound)));
    }
}
