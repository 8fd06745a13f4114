use axum_helpers::Role;
use database::with_deadline;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, NewUser, UpdateUser, User, UserFilter};
use crate::password::hash_password;
use crate::repository::UserRepository;

/// User management used by staff and admins
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user with a hashed password. The role defaults to customer.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        with_deadline(async {
            let user = NewUser {
                id: Uuid::now_v7(),
                password_hash: hash_password(&input.password)?,
                email: input.email,
                full_name: input.full_name,
                role: input.role.unwrap_or_default(),
            };
            self.repository.create(user).await
        })
        .await
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        with_deadline(async { self.repository.get_by_id(id).await?.ok_or(UserError::NotFound) })
            .await
    }

    /// Pages smaller than ten rows are widened to ten.
    pub async fn list_users(&self, filter: UserFilter) -> UserResult<Vec<User>> {
        with_deadline(self.repository.list(filter.page_size(), filter.offset)).await
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        if input.is_empty() {
            return Err(UserError::NoFieldsToUpdate);
        }

        with_deadline(async { self.repository.update(id, input).await?.ok_or(UserError::NotFound) })
            .await
    }

    pub async fn update_role(&self, id: Uuid, role: Role) -> UserResult<User> {
        with_deadline(async {
            self.repository
                .update_role(id, role)
                .await?
                .ok_or(UserError::NotFound)
        })
        .await
    }

    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        with_deadline(async {
            if !self.repository.delete(id).await? {
                return Err(UserError::NotFound);
            }
            tracing::info!(user_id = %id, "Deleted user");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn user(id: Uuid, role: Role) -> User {
        User {
            id,
            email: "jane@example.com".into(),
            password_hash: String::new(),
            full_name: "Jane".into(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password_and_defaults_role() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|u: &NewUser| {
                u.role == Role::Customer
                    && u.password_hash != "secret123"
                    && u.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|u| Ok(user(u.id, u.role)));

        let service = UserService::new(mock_repo);
        let created = service
            .create_user(CreateUser {
                email: "jane@example.com".into(),
                password: "secret123".into(),
                full_name: "Jane".into(),
                role: None,
            })
            .await
            .unwrap();

        assert_eq!(created.role, Role::Customer);
    }

    #[tokio::test]
    async fn test_list_users_widens_small_pages() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_list()
            .with(eq(10u64), eq(20u64))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = UserService::new(mock_repo);
        let users = service
            .list_users(UserFilter {
                limit: Some(2),
                offset: 20,
            })
            .await
            .unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_empty_update_never_reaches_repository() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let result = service.update_user(Uuid::now_v7(), UpdateUser::default()).await;
        assert!(matches!(result, Err(UserError::NoFieldsToUpdate)));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_update_role().returning(|_, _| Ok(None));
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = UserService::new(mock_repo);
        let id = Uuid::now_v7();
        assert!(matches!(service.get_user(id).await, Err(UserError::NotFound)));
        assert!(matches!(service.update_role(id, Role::Staff).await, Err(UserError::NotFound)));
        assert!(matches!(service.delete_user(id).await, Err(UserError::NotFound)));
    }
}
