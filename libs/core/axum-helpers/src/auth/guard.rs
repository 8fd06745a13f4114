//! Per-route guards.
//!
//! Public and protected methods often share a path (`GET /products` is open,
//! `POST /products` is staff-only), so guards wrap a [`MethodRouter`] rather
//! than a whole router.
//!
//! ```ignore
//! Router::new().route(
//!     "/",
//!     get(list_products).merge(with_roles(post(create_product), &jwt, STAFF_OR_ADMIN)),
//! )
//! ```

use super::claims::Role;
use super::jwt::JwtAuth;
use super::middleware::{jwt_auth_middleware, require_roles};
use axum::{middleware::from_fn_with_state, routing::MethodRouter};

/// Require a valid bearer access token.
pub fn authenticated<S>(route: MethodRouter<S>, jwt: &JwtAuth) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(jwt.clone(), jwt_auth_middleware))
}

/// Require a valid bearer access token whose role is in `roles`.
pub fn with_roles<S>(route: MethodRouter<S>, jwt: &JwtAuth, roles: &'static [Role]) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    authenticated(route.route_layer(from_fn_with_state(roles, require_roles)), jwt)
}
