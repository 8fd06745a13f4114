use async_trait::async_trait;
use axum_helpers::Role;
use chrono::{DateTime, Utc};
use database::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, PartialUpdate, page_value,
};
use sea_orm::{DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{AuthToken, NewUser, UpdateUser, User};
use crate::repository::{AuthTokenRepository, UserRepository};

const USER_COLUMNS: &str = "id, email, password_hash, full_name, role, created_at, updated_at";
const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DbErr;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|_| DbErr::Type(format!("unknown role '{}' for user {}", row.role, row.id)))?;

        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn stmt(sql: &str, values: Vec<sea_orm::Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

async fn fetch_one<C: ConnectionTrait>(conn: &C, statement: Statement) -> UserResult<Option<User>> {
    let row = UserRow::find_by_statement(statement).one(conn).await?;
    Ok(row.map(User::try_from).transpose()?)
}

async fn insert_user<C: ConnectionTrait>(conn: &C, user: NewUser) -> UserResult<User> {
    let sql = format!(
        "INSERT INTO users (id, email, password_hash, full_name, role) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        USER_COLUMNS
    );
    let statement = stmt(
        &sql,
        vec![
            user.id.into(),
            user.email.into(),
            user.password_hash.into(),
            user.full_name.into(),
            user.role.to_string().into(),
        ],
    );

    match fetch_one(conn, statement).await {
        Ok(Some(created)) => {
            tracing::info!(user_id = %created.id, "Created user");
            Ok(created)
        }
        Ok(None) => Err(DbErr::RecordNotInserted.into()),
        Err(UserError::Database(e)) if database::is_unique_violation(&e, Some(EMAIL_CONSTRAINT)) => {
            Err(UserError::DuplicateEmail)
        }
        Err(e) => Err(e),
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> UserResult<User> {
        insert_user(&self.db, user).await
    }

    async fn create_in(&self, txn: &DatabaseTransaction, user: NewUser) -> UserResult<User> {
        insert_user(txn, user).await
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        fetch_one(&self.db, stmt(&sql, vec![id.into()])).await
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1 LIMIT 1", USER_COLUMNS);
        fetch_one(&self.db, stmt(&sql, vec![email.into()])).await
    }

    async fn list(&self, limit: u64, offset: u64) -> UserResult<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );
        let rows = UserRow::find_by_statement(stmt(
            &sql,
            vec![page_value(limit)?, page_value(offset)?],
        ))
        .all(&self.db)
        .await?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, DbErr>>()?;
        Ok(users)
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<Option<User>> {
        let statement = PartialUpdate::new("users")
            .set("full_name", input.full_name)
            .build("id", id.into(), USER_COLUMNS)
            .ok_or(UserError::NoFieldsToUpdate)?;

        fetch_one(&self.db, statement).await
    }

    async fn update_role(&self, id: Uuid, role: Role) -> UserResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            USER_COLUMNS
        );
        let updated = fetch_one(&self.db, stmt(&sql, vec![role.to_string().into(), id.into()])).await?;
        if updated.is_some() {
            tracing::info!(user_id = %id, role = %role, "Updated user role");
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = self
            .db
            .execute_raw(stmt("DELETE FROM users WHERE id = $1", vec![id.into()]))
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, FromQueryResult)]
struct AuthTokenRow {
    user_id: Uuid,
    refresh_token: String,
    expired_at: DateTime<Utc>,
}

impl From<AuthTokenRow> for AuthToken {
    fn from(row: AuthTokenRow) -> Self {
        Self {
            user_id: row.user_id,
            refresh_token: row.refresh_token,
            expired_at: row.expired_at,
        }
    }
}

#[derive(Clone)]
pub struct PgAuthTokenRepository {
    db: DatabaseConnection,
}

impl PgAuthTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthTokenRepository for PgAuthTokenRepository {
    async fn save_in(&self, txn: &DatabaseTransaction, token: AuthToken) -> UserResult<()> {
        let statement = stmt(
            "INSERT INTO auth_tokens (user_id, refresh_token, expired_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE SET \
                refresh_token = EXCLUDED.refresh_token, \
                expired_at = EXCLUDED.expired_at, \
                updated_at = NOW()",
            vec![
                token.user_id.into(),
                token.refresh_token.into(),
                token.expired_at.into(),
            ],
        );
        txn.execute_raw(statement).await?;
        tracing::debug!(user_id = %token.user_id, "Saved refresh token");
        Ok(())
    }

    async fn rotate_in(
        &self,
        txn: &DatabaseTransaction,
        presented_hash: &str,
        next: AuthToken,
    ) -> UserResult<bool> {
        let result = txn
            .execute_raw(stmt(
                "UPDATE auth_tokens SET refresh_token = $1, expired_at = $2, updated_at = NOW() \
                 WHERE user_id = $3 AND refresh_token = $4 AND expired_at > NOW()",
                vec![
                    next.refresh_token.into(),
                    next.expired_at.into(),
                    next.user_id.into(),
                    presented_hash.into(),
                ],
            ))
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find(&self, user_id: Uuid, token_hash: &str) -> UserResult<Option<AuthToken>> {
        let row = AuthTokenRow::find_by_statement(stmt(
            "SELECT user_id, refresh_token, expired_at FROM auth_tokens \
             WHERE user_id = $1 AND refresh_token = $2 LIMIT 1",
            vec![user_id.into(), token_hash.into()],
        ))
        .one(&self.db)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, user_id: Uuid) -> UserResult<bool> {
        let result = self
            .db
            .execute_raw(stmt(
                "DELETE FROM auth_tokens WHERE user_id = $1",
                vec![user_id.into()],
            ))
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
