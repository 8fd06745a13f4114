//! Categories Domain
//!
//! Flat product categories. A product has one primary category
//! (`products.category_id`) and may be linked to more through
//! `product_categories`, which the products domain manages.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use models::{Category, CreateCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::CategoryRepository;
pub use service::CategoryService;
