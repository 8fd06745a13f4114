use axum::Router;
use domain_addresses::{AddressService, PgAddressRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = AddressService::new(PgAddressRepository::new(state.db.clone()), state.db.clone());
    handlers::router(service, &state.jwt)
}
