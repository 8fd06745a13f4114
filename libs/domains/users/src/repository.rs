use async_trait::async_trait;
use axum_helpers::Role;
use database::DatabaseTransaction;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{AuthToken, NewUser, UpdateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken email yields `UserError::DuplicateEmail`
    async fn create(&self, user: NewUser) -> UserResult<User>;

    /// Same as [`create`](Self::create), inside an open transaction
    async fn create_in(&self, txn: &DatabaseTransaction, user: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Lookup used by login; includes the password hash
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn list(&self, limit: u64, offset: u64) -> UserResult<Vec<User>>;

    /// Partial update; `None` when the user does not exist
    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<Option<User>>;

    async fn update_role(&self, id: Uuid, role: Role) -> UserResult<Option<User>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// Refresh-token storage, one row per user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthTokenRepository: Send + Sync {
    /// Insert or replace the user's refresh token hash
    async fn save_in(&self, txn: &DatabaseTransaction, token: AuthToken) -> UserResult<()>;

    /// Swap `presented_hash` for `next` in one statement.
    ///
    /// Only an unexpired row still holding `presented_hash` is replaced, so of
    /// two callers presenting the same token at most one gets `true`.
    async fn rotate_in(
        &self,
        txn: &DatabaseTransaction,
        presented_hash: &str,
        next: AuthToken,
    ) -> UserResult<bool>;

    /// Row matching both the user and the token hash
    async fn find(&self, user_id: Uuid, token_hash: &str) -> UserResult<Option<AuthToken>>;

    async fn delete(&self, user_id: Uuid) -> UserResult<bool>;
}
