use axum::Router;
use domain_addresses::PgAddressRepository;
use domain_carts::PgCartRepository;
use domain_orders::{OrderService, PgOrderRepository, handlers};
use domain_products::PgProductRepository;

use crate::state::AppState;

/// Checkout writes across four tables, so the service gets every
/// repository plus the pool to open its transaction on.
pub fn router(state: &AppState) -> Router {
    let db = &state.db;
    let service = OrderService::new(
        PgOrderRepository::new(db.clone()),
        PgCartRepository::new(db.clone()),
        PgAddressRepository::new(db.clone()),
        PgProductRepository::new(db.clone()),
        db.clone(),
    );
    handlers::router(service, &state.jwt)
}
