//! Partial `UPDATE` statements built from optional fields.
//!
//! Only the columns whose value is `Some` end up in the `SET` list, and
//! `updated_at` is always refreshed. An update with nothing to set builds no
//! statement at all, so callers can report "no fields to update" without
//! touching the database.
//!
//! ```ignore
//! let stmt = PartialUpdate::new("categories")
//!     .set("name", input.name)
//!     .set("description", input.description)
//!     .build("id", id.into(), "id, name, description, created_at, updated_at");
//! ```

use sea_orm::{DbBackend, Statement, Value};

#[derive(Debug)]
pub struct PartialUpdate {
    table: &'static str,
    assignments: Vec<(&'static str, Value)>,
}

impl PartialUpdate {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    /// Add `column = value` when `value` is present.
    pub fn set<V: Into<Value>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.assignments.push((column, value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Render `UPDATE .. SET .. WHERE key_column = key RETURNING returning`.
    ///
    /// Returns `None` when no column was set.
    pub fn build(self, key_column: &str, key: Value, returning: &str) -> Option<Statement> {
        if self.assignments.is_empty() {
            return None;
        }

        let mut values = Vec::with_capacity(self.assignments.len() + 1);
        let mut set_list = Vec::with_capacity(self.assignments.len() + 1);

        for (column, value) in self.assignments {
            values.push(value);
            set_list.push(format!("{} = ${}", column, values.len()));
        }
        set_list.push("updated_at = NOW()".to_string());
        values.push(key);

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
            self.table,
            set_list.join(", "),
            key_column,
            values.len(),
            returning
        );

        Some(Statement::from_sql_and_values(DbBackend::Postgres, sql, values))
    }
}
