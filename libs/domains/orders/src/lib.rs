//! Orders Domain
//!
//! Checkout turns a user's cart into an order in one transaction: the order
//! header, a snapshot of the shipping address, one item per cart line with
//! the price at purchase time, stock deduction and cart clearing either all
//! happen or none do.
//!
//! Orders start `pending`; staff move them through `paid`, `shipped`,
//! `completed` or `cancelled`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use models::{
    CreateOrder, Order, OrderAddress, OrderDetail, OrderFilter, OrderItem, OrderStatus,
    OrderSummary, UpdateOrderStatus,
};
pub use postgres::PgOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
