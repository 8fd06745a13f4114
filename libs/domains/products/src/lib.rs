//! Products Domain
//!
//! The product catalog backed by PostgreSQL.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, role guards
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, deadline
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Rows, DTOs, list filter
//! └─────────────┘
//! ```
//!
//! Stock only moves through two guarded statements: [`ProductService::add_stock`]
//! and [`ProductRepository::deduct_stock_in`], which the orders domain runs inside
//! its checkout transaction. Neither can take stock below zero.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_products::{PgProductRepository, ProductService, handlers};
//!
//! let service = ProductService::new(PgProductRepository::new(db.clone()));
//! let router = handlers::router(service, &jwt);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    AddStock, AssignCategories, AssignedCategory, CreateProduct, Product, ProductFilter,
    ProductOrderBy, SortDirection, UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use repository::ProductRepository;
#[cfg(feature = "mock")]
pub use repository::MockProductRepository;
pub use service::ProductService;
