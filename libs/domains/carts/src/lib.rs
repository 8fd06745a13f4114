//! Carts Domain
//!
//! One cart per user, one row per product. Checkout in the orders domain
//! reads [`CartRepository::lines`] and empties the cart with
//! [`CartRepository::clear_in`] inside its transaction.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CartError, CartResult};
pub use models::{AddToCart, CartItem, CartLine, cart_total};
pub use postgres::PgCartRepository;
pub use repository::CartRepository;
#[cfg(feature = "mock")]
pub use repository::MockCartRepository;
pub use service::CartService;
