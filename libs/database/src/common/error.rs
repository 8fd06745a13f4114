use sea_orm::{DbErr, SqlErr};

/// Error type for connection-level database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] DbErr),

    /// Connection failed after retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// True when `err` is a violation of the named unique constraint, or of any
/// unique constraint when `constraint` is `None`.
pub fn is_unique_violation(err: &DbErr, constraint: Option<&str>) -> bool {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            constraint.is_none_or(|name| message.contains(name))
        }
        _ => false,
    }
}

/// True when `err` is a foreign key violation.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_errors_are_not_constraint_violations() {
        let err = DbErr::Custom("boom".to_string());
        assert!(!is_unique_violation(&err, None));
        assert!(!is_foreign_key_violation(&err));
    }

    #[test]
    fn test_record_not_found_is_not_a_violation() {
        let err = DbErr::RecordNotFound("users".to_string());
        assert!(!is_unique_violation(&err, Some("users_email_key")));
    }
}
