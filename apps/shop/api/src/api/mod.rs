use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

/// Every domain router, without the `/api/v{n}` prefix.
/// `create_router` nests this under the versioned prefix.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/users", users::router(state))
        .nest("/addresses", addresses::router(state))
        .nest("/categories", categories::router(state))
        .nest("/products", products::router(state))
        .nest("/cart", cart::router(state))
        .nest("/orders", orders::router(state))
}

/// `/ready`, which needs the database handle.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests;
