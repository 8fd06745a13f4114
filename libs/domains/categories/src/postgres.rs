use async_trait::async_trait;
use database::{ConnectionTrait, DatabaseConnection, DbErr, PartialUpdate, is_foreign_key_violation};
use sea_orm::{DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

fn stmt(sql: &str, values: Vec<sea_orm::Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let sql = format!(
            "INSERT INTO categories (id, name, description) VALUES ($1, $2, $3) RETURNING {}",
            CATEGORY_COLUMNS
        );
        let category = Category::find_by_statement(stmt(
            &sql,
            vec![
                Uuid::now_v7().into(),
                input.name.into(),
                input.description.unwrap_or_default().into(),
            ],
        ))
        .one(&self.db)
        .await?
        .ok_or(DbErr::RecordNotInserted)?;

        tracing::info!(category_id = %category.id, name = %category.name, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
        Ok(Category::find_by_statement(stmt(&sql, vec![id.into()]))
            .one(&self.db)
            .await?)
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let sql = format!("SELECT {} FROM categories ORDER BY name ASC, id ASC", CATEGORY_COLUMNS);
        Ok(Category::find_by_statement(stmt(&sql, vec![]))
            .all(&self.db)
            .await?)
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Option<Category>> {
        let statement = PartialUpdate::new("categories")
            .set("name", input.name)
            .set("description", input.description)
            .build("id", id.into(), CATEGORY_COLUMNS)
            .ok_or(CategoryError::NoFieldsToUpdate)?;

        Ok(Category::find_by_statement(statement).one(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let result = self
            .db
            .execute_raw(stmt("DELETE FROM categories WHERE id = $1", vec![id.into()]))
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    CategoryError::InUse
                } else {
                    CategoryError::Database(e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }
}
