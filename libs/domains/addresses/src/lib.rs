//! Addresses Domain
//!
//! Shipping addresses owned by users, with a single default per user.
//! Orders copy an address into their own snapshot table, so editing or
//! deleting an address never changes past orders.

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{AddressError, AddressResult};
pub use models::{Address, CreateAddress, UpdateAddress};
pub use postgres::PgAddressRepository;
pub use repository::AddressRepository;
#[cfg(feature = "mock")]
pub use repository::MockAddressRepository;
pub use service::AddressService;
