use axum::Router;
use domain_users::{AuthService, PgAuthTokenRepository, PgUserRepository, auth_handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = AuthService::new(
        PgUserRepository::new(state.db.clone()),
        PgAuthTokenRepository::new(state.db.clone()),
        state.db.clone(),
        state.jwt.clone(),
    );
    auth_handlers::router(service, &state.jwt)
}
