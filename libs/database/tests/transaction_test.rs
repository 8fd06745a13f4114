//! Transaction coordinator tests against a real PostgreSQL container.
//!
//! Each test creates its own scratch table so the commit / rollback outcome
//! can be observed from a separate connection after the unit of work ends.

use database::{DbErr, with_transaction};
use futures::FutureExt;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::panic::AssertUnwindSafe;
use test_utils::TestDatabase;

async fn create_probe_table(db: &DatabaseConnection, table: &str) {
    db.execute_unprepared(&format!(
        "CREATE TABLE {} (id INT PRIMARY KEY, label TEXT NOT NULL)",
        table
    ))
    .await
    .unwrap();
}

async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let stmt = Statement::from_string(
        DatabaseBackend::Postgres,
        format!("SELECT COUNT(*) AS n FROM {}", table),
    );
    let row = db.query_one_raw(stmt).await.unwrap().unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

fn insert(table: &str, id: i32) -> Statement {
    Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        format!("INSERT INTO {} (id, label) VALUES ($1, $2)", table),
        [id.into(), format!("row-{}", id).into()],
    )
}

#[derive(Debug, thiserror::Error)]
enum ProbeError {
    #[error("db: {0}")]
    Db(#[from] DbErr),
    #[error("business rule failed")]
    Rule,
}

#[tokio::test]
async fn test_commits_when_unit_of_work_succeeds() {
    let db = TestDatabase::new().await;
    let conn = db.connection();
    create_probe_table(&conn, "tx_commit").await;

    let value = with_transaction(&conn, |txn| {
        Box::pin(async move {
            txn.execute_raw(insert("tx_commit", 1)).await?;
            txn.execute_raw(insert("tx_commit", 2)).await?;
            Ok::<_, ProbeError>("done")
        })
    })
    .await
    .unwrap();

    assert_eq!(value, "done");
    assert_eq!(count_rows(&conn, "tx_commit").await, 2);
}

#[tokio::test]
async fn test_rolls_back_when_unit_of_work_returns_error() {
    let db = TestDatabase::new().await;
    let conn = db.connection();
    create_probe_table(&conn, "tx_error").await;

    let result: Result<(), ProbeError> = with_transaction(&conn, |txn| {
        Box::pin(async move {
            txn.execute_raw(insert("tx_error", 1)).await?;
            Err(ProbeError::Rule)
        })
    })
    .await;

    assert!(matches!(result, Err(ProbeError::Rule)));
    assert_eq!(count_rows(&conn, "tx_error").await, 0);
}

#[tokio::test]
async fn test_rolls_back_when_a_statement_fails_midway() {
    let db = TestDatabase::new().await;
    let conn = db.connection();
    create_probe_table(&conn, "tx_midway").await;

    // Second insert hits the primary key and aborts the whole unit.
    let result: Result<(), ProbeError> = with_transaction(&conn, |txn| {
        Box::pin(async move {
            txn.execute_raw(insert("tx_midway", 1)).await?;
            txn.execute_raw(insert("tx_midway", 1)).await?;
            Ok(())
        })
    })
    .await;

    assert!(matches!(result, Err(ProbeError::Db(_))));
    assert_eq!(count_rows(&conn, "tx_midway").await, 0);
}

#[tokio::test]
async fn test_rolls_back_and_resumes_panic() {
    let db = TestDatabase::new().await;
    let conn = db.connection();
    create_probe_table(&conn, "tx_panic").await;

    let outcome = AssertUnwindSafe(with_transaction(&conn, |txn| {
        Box::pin(async move {
            txn.execute_raw(insert("tx_panic", 1)).await?;
            if txn.get_database_backend() == DatabaseBackend::Postgres {
                panic!("unit of work exploded");
            }
            Ok::<_, ProbeError>(())
        })
    }))
    .catch_unwind()
    .await;

    assert!(outcome.is_err(), "panic must propagate to the caller");
    assert_eq!(count_rows(&conn, "tx_panic").await, 0);
}
