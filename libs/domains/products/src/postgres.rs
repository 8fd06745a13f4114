use async_trait::async_trait;
use database::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, PartialUpdate,
    is_foreign_key_violation, page_value,
};
use sea_orm::{DbBackend, FromQueryResult, Statement, Value};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    AssignedCategory, CreateProduct, Product, ProductFilter, ProductOrderBy, UpdateProduct,
};
use crate::repository::ProductRepository;

const PRODUCT_COLUMNS: &str =
    "id, category_id, name, description, price, stock, image_url, created_at, updated_at";

fn stmt(sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

/// Map a foreign key violation to `on_fk`, anything else to `Database`.
fn fk_or(err: DbErr, on_fk: ProductError) -> ProductError {
    if is_foreign_key_violation(&err) {
        on_fk
    } else {
        ProductError::Database(err)
    }
}

/// `SELECT` for a filtered, sorted page. Column and direction come from
/// enums, everything else is bound.
fn list_statement(filter: &ProductFilter) -> Result<Statement, DbErr> {
    let mut values: Vec<Value> = Vec::with_capacity(3);
    let mut sql = format!("SELECT {} FROM products", PRODUCT_COLUMNS);

    if let Some(category_id) = filter.category_id {
        values.push(category_id.into());
        sql.push_str(&format!(" WHERE category_id = ${}", values.len()));
    }

    let direction = filter.sort.as_ref();
    sql.push_str(&format!(" ORDER BY {} {}", filter.order_by.as_ref(), direction));
    if filter.order_by != ProductOrderBy::Id {
        sql.push_str(&format!(", id {}", direction));
    }

    values.push(page_value(filter.limit)?);
    sql.push_str(&format!(" LIMIT ${}", values.len()));
    values.push(page_value(filter.offset)?);
    sql.push_str(&format!(" OFFSET ${}", values.len()));

    Ok(stmt(&sql, values))
}

#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let sql = format!(
            "INSERT INTO products (id, category_id, name, description, price, stock, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            PRODUCT_COLUMNS
        );
        let product = Product::find_by_statement(stmt(
            &sql,
            vec![
                Uuid::now_v7().into(),
                input.category_id.into(),
                input.name.into(),
                input.description.into(),
                input.price.into(),
                input.stock.into(),
                input.image_url.into(),
            ],
        ))
        .one(&self.db)
        .await
        .map_err(|e| fk_or(e, ProductError::CategoryNotFound))?
        .ok_or(DbErr::RecordNotInserted)?;

        tracing::info!(product_id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        Ok(Product::find_by_statement(stmt(&sql, vec![id.into()]))
            .one(&self.db)
            .await?)
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        Ok(Product::find_by_statement(list_statement(&filter)?)
            .all(&self.db)
            .await?)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let statement = PartialUpdate::new("products")
            .set("category_id", input.category_id)
            .set("name", input.name)
            .set("description", input.description)
            .set("price", input.price)
            .set("stock", input.stock)
            .set("image_url", input.image_url)
            .build("id", id.into(), PRODUCT_COLUMNS)
            .ok_or(ProductError::NoFieldsToUpdate)?;

        Product::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(|e| fk_or(e, ProductError::CategoryNotFound))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self
            .db
            .execute_raw(stmt("DELETE FROM products WHERE id = $1", vec![id.into()]))
            .await
            .map_err(|e| fk_or(e, ProductError::InUse))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        let sql = format!(
            "UPDATE products SET stock = stock + $1, updated_at = NOW() \
             WHERE id = $2 AND stock + $1 >= 0 RETURNING {}",
            PRODUCT_COLUMNS
        );
        Ok(Product::find_by_statement(stmt(&sql, vec![quantity.into(), id.into()]))
            .one(&self.db)
            .await?)
    }

    async fn deduct_stock_in(
        &self,
        txn: &DatabaseTransaction,
        id: Uuid,
        quantity: i32,
    ) -> ProductResult<bool> {
        let result = txn
            .execute_raw(stmt(
                "UPDATE products SET stock = stock - $1, updated_at = NOW() \
                 WHERE id = $2 AND stock >= $1",
                vec![quantity.into(), id.into()],
            ))
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn assign_categories(&self, product_id: Uuid, category_ids: Vec<Uuid>) -> ProductResult<()> {
        if category_ids.is_empty() {
            return Ok(());
        }

        let mut values: Vec<Value> = vec![product_id.into()];
        let mut rows = Vec::with_capacity(category_ids.len());
        for category_id in category_ids {
            values.push(category_id.into());
            rows.push(format!("($1, ${})", values.len()));
        }
        let sql = format!(
            "INSERT INTO product_categories (product_id, category_id) VALUES {} \
             ON CONFLICT DO NOTHING",
            rows.join(", ")
        );

        self.db
            .execute_raw(stmt(&sql, values))
            .await
            .map_err(|e| fk_or(e, ProductError::LinkNotFound))?;
        Ok(())
    }

    async fn list_categories(&self, product_id: Uuid) -> ProductResult<Vec<AssignedCategory>> {
        Ok(AssignedCategory::find_by_statement(stmt(
            "SELECT c.id, c.name, c.description FROM categories c \
             JOIN product_categories pc ON pc.category_id = c.id \
             WHERE pc.product_id = $1 ORDER BY c.name ASC",
            vec![product_id.into()],
        ))
        .all(&self.db)
        .await?)
    }

    async fn unassign_category(&self, product_id: Uuid, category_id: Uuid) -> ProductResult<bool> {
        let result = self
            .db
            .execute_raw(stmt(
                "DELETE FROM product_categories WHERE product_id = $1 AND category_id = $2",
                vec![product_id.into(), category_id.into()],
            ))
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;

    #[test]
    fn test_default_list_statement() {
        let statement = list_statement(&ProductFilter::default()).unwrap();
        assert_eq!(
            statement.sql,
            format!(
                "SELECT {} FROM products ORDER BY id DESC LIMIT $1 OFFSET $2",
                PRODUCT_COLUMNS
            )
        );
    }

    #[test]
    fn test_filtered_list_statement() {
        let filter = ProductFilter {
            category_id: Some(Uuid::now_v7()),
            order_by: ProductOrderBy::Price,
            sort: SortDirection::Asc,
            limit: 5,
            offset: 10,
        };
        let statement = list_statement(&filter).unwrap();
        assert!(statement.sql.ends_with(
            "WHERE category_id = $1 ORDER BY price ASC, id ASC LIMIT $2 OFFSET $3"
        ));
        assert_eq!(statement.values.unwrap().0.len(), 3);
    }
}
