//! Registration, login and refresh-token rotation.
//!
//! Every refresh-token write goes through a transaction so registration can
//! create the user and its token row atomically, and login/refresh share the
//! same code path.

use axum_helpers::{JwtAuth, Role, TokenPair, hash_token};
use chrono::Utc;
use database::{DatabaseConnection, with_deadline, with_transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{AuthToken, CreateUser, LoginRequest, NewUser};
use crate::password::{hash_password, verify_password};
use crate::repository::{AuthTokenRepository, UserRepository};

pub struct AuthService<U: UserRepository, T: AuthTokenRepository> {
    users: Arc<U>,
    tokens: Arc<T>,
    db: DatabaseConnection,
    jwt: JwtAuth,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository + 'static,
    T: AuthTokenRepository + 'static,
{
    pub fn new(users: U, tokens: T, db: DatabaseConnection, jwt: JwtAuth) -> Self {
        Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            db,
            jwt,
        }
    }

    /// Create a customer account and sign it in.
    ///
    /// The user row and its refresh token are committed together.
    pub async fn register(&self, input: CreateUser) -> UserResult<TokenPair> {
        with_deadline(async {
            let new_user = NewUser {
                id: Uuid::now_v7(),
                password_hash: hash_password(&input.password)?,
                email: input.email,
                full_name: input.full_name,
                role: Role::Customer,
            };

            let users = Arc::clone(&self.users);
            let tokens = Arc::clone(&self.tokens);
            let jwt = self.jwt.clone();

            let (user_id, pair) = with_transaction(&self.db, move |txn| {
                Box::pin(async move {
                    let user = users.create_in(txn, new_user).await?;
                    let pair = jwt.issue_pair(user.id, &user.email, user.role)?;
                    tokens.save_in(txn, stored_token(user.id, &pair)).await?;
                    Ok::<_, UserError>((user.id, pair))
                })
            })
            .await?;

            tracing::info!(user_id = %user_id, "Registered user");
            Ok(pair)
        })
        .await
    }

    /// Unknown emails and wrong passwords fail the same way.
    pub async fn login(&self, input: LoginRequest) -> UserResult<TokenPair> {
        with_deadline(async {
            let user = self
                .users
                .get_by_email(&input.email)
                .await?
                .ok_or(UserError::InvalidCredentials)?;

            if !verify_password(&input.password, &user.password_hash)? {
                tracing::info!(user_id = %user.id, "Login rejected");
                return Err(UserError::InvalidCredentials);
            }

            let pair = self.jwt.issue_pair(user.id, &user.email, user.role)?;
            self.store(stored_token(user.id, &pair)).await?;

            tracing::info!(user_id = %user.id, "User logged in");
            Ok(pair)
        })
        .await
    }

    /// Rotate the caller's tokens.
    ///
    /// The presented refresh token must verify, belong to `caller`, and match
    /// the stored hash of an unexpired row. The stored hash is swapped for the
    /// new one with a single conditional update, so a token rotates once even
    /// when presented concurrently.
    pub async fn refresh(&self, caller: Uuid, refresh_token: &str) -> UserResult<TokenPair> {
        with_deadline(async {
            let claims = self.jwt.verify_refresh(refresh_token)?;

            if claims.sub != caller {
                tracing::warn!(caller = %caller, subject = %claims.sub, "Refresh token owner mismatch");
                return Err(UserError::TokenOwnerMismatch);
            }

            let presented = hash_token(refresh_token);
            let stored = self
                .tokens
                .find(claims.sub, &presented)
                .await?
                .ok_or(UserError::TokenNotFound)?;

            if Utc::now() > stored.expired_at {
                return Err(UserError::TokenExpired);
            }

            let pair = self.jwt.issue_pair(claims.sub, &claims.email, claims.role)?;
            let next = stored_token(claims.sub, &pair);
            let tokens = Arc::clone(&self.tokens);

            let rotated = with_transaction(&self.db, move |txn| {
                Box::pin(async move { tokens.rotate_in(txn, &presented, next).await })
            })
            .await?;

            if !rotated {
                tracing::warn!(user_id = %claims.sub, "Refresh token already rotated");
                return Err(UserError::TokenNotFound);
            }

            tracing::debug!(user_id = %claims.sub, "Rotated refresh token");
            Ok(pair)
        })
        .await
    }

    pub async fn logout(&self, user_id: Uuid) -> UserResult<()> {
        with_deadline(async {
            if !self.tokens.delete(user_id).await? {
                return Err(UserError::TokenNotFound);
            }
            tracing::info!(user_id = %user_id, "User logged out");
            Ok(())
        })
        .await
    }

    async fn store(&self, token: AuthToken) -> UserResult<()> {
        let tokens = Arc::clone(&self.tokens);
        with_transaction(&self.db, move |txn| {
            Box::pin(async move { tokens.save_in(txn, token).await })
        })
        .await
    }
}

fn stored_token(user_id: Uuid, pair: &TokenPair) -> AuthToken {
    AuthToken {
        user_id,
        refresh_token: hash_token(&pair.refresh_token),
        expired_at: pair.refresh_expires_at,
    }
}
