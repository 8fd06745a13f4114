use async_trait::async_trait;
use database::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, PartialUpdate};
use sea_orm::{DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{AddressError, AddressResult};
use crate::models::{Address, CreateAddress, UpdateAddress};
use crate::repository::AddressRepository;

const ADDRESS_COLUMNS: &str =
    "id, user_id, address_line, city, state, postal_code, phone, is_default, created_at, updated_at";

fn stmt(sql: &str, values: Vec<sea_orm::Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

#[derive(Clone)]
pub struct PgAddressRepository {
    db: DatabaseConnection,
}

impl PgAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn create(&self, user_id: Uuid, input: CreateAddress) -> AddressResult<Address> {
        let sql = format!(
            "INSERT INTO addresses (id, user_id, address_line, city, state, postal_code, phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            ADDRESS_COLUMNS
        );
        let address = Address::find_by_statement(stmt(
            &sql,
            vec![
                Uuid::now_v7().into(),
                user_id.into(),
                input.address_line.into(),
                input.city.into(),
                input.state.into(),
                input.postal_code.into(),
                input.phone.into(),
            ],
        ))
        .one(&self.db)
        .await?
        .ok_or(DbErr::RecordNotInserted)?;

        tracing::info!(address_id = %address.id, user_id = %user_id, "Created address");
        Ok(address)
    }

    async fn get_by_id(&self, id: Uuid) -> AddressResult<Option<Address>> {
        let sql = format!("SELECT {} FROM addresses WHERE id = $1", ADDRESS_COLUMNS);
        Ok(Address::find_by_statement(stmt(&sql, vec![id.into()]))
            .one(&self.db)
            .await?)
    }

    async fn list_by_user(&self, user_id: Uuid) -> AddressResult<Vec<Address>> {
        let sql = format!(
            "SELECT {} FROM addresses WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            ADDRESS_COLUMNS
        );
        Ok(Address::find_by_statement(stmt(&sql, vec![user_id.into()]))
            .all(&self.db)
            .await?)
    }

    async fn update(&self, id: Uuid, input: UpdateAddress) -> AddressResult<Option<Address>> {
        let statement = PartialUpdate::new("addresses")
            .set("address_line", input.address_line)
            .set("city", input.city)
            .set("state", input.state)
            .set("postal_code", input.postal_code)
            .set("phone", input.phone)
            .build("id", id.into(), ADDRESS_COLUMNS)
            .ok_or(AddressError::NoFieldsToUpdate)?;

        Ok(Address::find_by_statement(statement).one(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> AddressResult<bool> {
        let result = self
            .db
            .execute_raw(stmt("DELETE FROM addresses WHERE id = $1", vec![id.into()]))
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_default_in(&self, txn: &DatabaseTransaction, user_id: Uuid) -> AddressResult<()> {
        txn.execute_raw(stmt(
            "UPDATE addresses SET is_default = FALSE, updated_at = NOW() \
             WHERE user_id = $1 AND is_default",
            vec![user_id.into()],
        ))
        .await?;
        Ok(())
    }

    async fn mark_default_in(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        user_id: Uuid,
    ) -> AddressResult<Option<Address>> {
        let sql = format!(
            "UPDATE addresses SET is_default = TRUE, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {}",
            ADDRESS_COLUMNS
        );
        Ok(Address::find_by_statement(stmt(&sql, vec![id.into(), user_id.into()]))
            .one(txn)
            .await?)
    }
}
