use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use std::time::Instant;
use tracing::debug;

use crate::common::DatabaseError;

/// Run `SELECT 1` against the pool; used by the readiness probe.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    let started = Instant::now();
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());

    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "PostgreSQL health check passed"
    );
    Ok(())
}
