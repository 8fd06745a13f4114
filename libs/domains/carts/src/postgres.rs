use async_trait::async_trait;
use database::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, is_foreign_key_violation,
};
use sea_orm::{DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::models::{AddToCart, CartItem, CartLine};
use crate::repository::CartRepository;

fn stmt(sql: &str, values: Vec<sea_orm::Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

fn clear_statement(user_id: Uuid) -> Statement {
    stmt("DELETE FROM carts WHERE user_id = $1", vec![user_id.into()])
}

#[derive(Clone)]
pub struct PgCartRepository {
    db: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn add(&self, user_id: Uuid, input: AddToCart) -> CartResult<CartItem> {
        let item = CartItem::find_by_statement(stmt(
            "INSERT INTO carts (id, user_id, product_id, quantity) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, product_id) \
             DO UPDATE SET quantity = carts.quantity + EXCLUDED.quantity, updated_at = NOW() \
             RETURNING id, user_id, product_id, quantity, created_at, updated_at",
            vec![
                Uuid::now_v7().into(),
                user_id.into(),
                input.product_id.into(),
                input.quantity.into(),
            ],
        ))
        .one(&self.db)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                CartError::ProductNotFound
            } else {
                CartError::Database(e)
            }
        })?
        .ok_or(DbErr::RecordNotInserted)?;

        tracing::debug!(user_id = %user_id, product_id = %item.product_id, quantity = item.quantity, "Cart line saved");
        Ok(item)
    }

    async fn lines(&self, user_id: Uuid) -> CartResult<Vec<CartLine>> {
        Ok(CartLine::find_by_statement(stmt(
            "SELECT c.product_id, p.name AS product_name, p.price AS product_price, \
             c.quantity AS product_quantity \
             FROM carts c JOIN products p ON p.id = c.product_id \
             WHERE c.user_id = $1 ORDER BY c.created_at ASC, c.id ASC",
            vec![user_id.into()],
        ))
        .all(&self.db)
        .await?)
    }

    async fn remove(&self, user_id: Uuid, product_id: Uuid) -> CartResult<bool> {
        let result = self
            .db
            .execute_raw(stmt(
                "DELETE FROM carts WHERE user_id = $1 AND product_id = $2",
                vec![user_id.into(), product_id.into()],
            ))
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: Uuid) -> CartResult<u64> {
        Ok(self.db.execute_raw(clear_statement(user_id)).await?.rows_affected())
    }

    async fn clear_in(&self, txn: &DatabaseTransaction, user_id: Uuid) -> CartResult<u64> {
        Ok(txn.execute_raw(clear_statement(user_id)).await?.rows_affected())
    }
}
