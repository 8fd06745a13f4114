//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`AppError`](crate::errors::AppError), so malformed
//! input answers with the same JSON envelope as the rest of the API.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::{UuidPath, UuidPathPair};
pub use validated_json::{ValidatedJson, ValidatedQuery};
