use axum::Router;
use domain_carts::{CartService, PgCartRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = CartService::new(PgCartRepository::new(state.db.clone()));
    handlers::router(service, &state.jwt)
}
