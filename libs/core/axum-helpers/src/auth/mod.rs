//! Authentication and authorization.
//!
//! - [`JwtAuth`] signs and verifies access and refresh tokens with separate
//!   secrets; [`hash_token`] produces the digest stored for refresh tokens
//! - [`jwt_auth_middleware`] turns a bearer token into an [`AuthUser`]
//! - [`require_roles`] gates routes on the caller's [`Role`]
//! - [`authenticated`] and [`with_roles`] apply both to a single method router
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let jwt = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/cart", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(jwt, jwt_auth_middleware));
//! ```

pub mod claims;
pub mod config;
pub mod guard;
pub mod jwt;
pub mod middleware;

pub use claims::{ADMIN_ONLY, AuthUser, Role, STAFF_OR_ADMIN, TokenClaims};
pub use config::JwtConfig;
pub use guard::{authenticated, with_roles};
pub use jwt::{JwtAuth, TokenError, TokenPair, hash_token};
pub use middleware::{jwt_auth_middleware, require_roles};
