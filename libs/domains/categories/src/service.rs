use database::with_deadline;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        with_deadline(self.repository.create(input)).await
    }

    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        with_deadline(self.repository.get_by_id(id))
            .await?
            .ok_or(CategoryError::NotFound)
    }

    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        with_deadline(self.repository.list()).await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        if input.is_empty() {
            return Err(CategoryError::NoFieldsToUpdate);
        }

        with_deadline(self.repository.update(id, input))
            .await?
            .ok_or(CategoryError::NotFound)
    }

    pub async fn delete_category(&self, id: Uuid) -> CategoryResult<()> {
        if !with_deadline(self.repository.delete(id)).await? {
            return Err(CategoryError::NotFound);
        }
        tracing::info!(category_id = %id, "Deleted category");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;
    use chrono::Utc;

    fn category(id: Uuid, name: &str) -> Category {
        Category {
            id,
            name: name.into(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_category_passes_through() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_create()
            .withf(|input| input.name == "books")
            .times(1)
            .returning(|input| Ok(category(Uuid::now_v7(), &input.name)));

        let service = CategoryService::new(repo);
        let created = service
            .create_category(CreateCategory {
                name: "books".into(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(created.name, "books");
    }

    #[tokio::test]
    async fn test_empty_update_never_reaches_repository() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_update().never();

        let result = CategoryService::new(repo)
            .update_category(Uuid::now_v7(), UpdateCategory::default())
            .await;
        assert!(matches!(result, Err(CategoryError::NoFieldsToUpdate)));
    }

    #[tokio::test]
    async fn test_update_missing_category() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let result = CategoryService::new(repo)
            .update_category(
                Uuid::now_v7(),
                UpdateCategory {
                    name: Some("games".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(CategoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let result = CategoryService::new(repo).delete_category(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CategoryError::NotFound)));
    }
}
