use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = UserService::new(PgUserRepository::new(state.db.clone()));
    handlers::router(service, &state.jwt)
}
