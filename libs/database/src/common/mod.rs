//! Common utilities shared by the connector and the domain repositories

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult, is_foreign_key_violation, is_unique_violation};
pub use retry::{RetryConfig, retry, retry_with_backoff};
