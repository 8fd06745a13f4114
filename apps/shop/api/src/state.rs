//! Shared application state.

use axum_helpers::JwtAuth;
use database::DatabaseConnection;

use crate::config::Config;

/// Built once in `main` and handed to every route module by reference.
/// Each domain router clones what it needs; both fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub jwt: JwtAuth,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let jwt = JwtAuth::new(&config.jwt);
        Self { config, db, jwt }
    }
}
