//! `LIMIT` / `OFFSET` binding for listing queries.

use sea_orm::{DbErr, Value};

/// Largest page offset that fits Postgres `BIGINT`.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Bind a page size or offset as `BIGINT`.
///
/// Values past `i64::MAX` are an error instead of wrapping negative.
pub fn page_value(n: u64) -> Result<Value, DbErr> {
    i64::try_from(n)
        .map(Value::from)
        .map_err(|_| DbErr::Custom(format!("page bound {} does not fit BIGINT", n)))
}
