//! # Axum Helpers
//!
//! Shared HTTP plumbing for the shop API and its domain crates.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT access/refresh tokens, bearer middleware, role gates
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: `AppError` and the JSON error envelope
//! - **[`response`]**: the `{"message", "data"}` success envelope
//! - **[`extractors`]**: UUID path and validated JSON/query extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{create_router, cors_layer_from_env, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(
//!     &config.api_prefix(),
//!     api_routes,
//!     health_router(app_info!()),
//!     cors_layer_from_env()?,
//! );
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

pub use auth::{
    ADMIN_ONLY, AuthUser, JwtAuth, JwtConfig, Role, STAFF_OR_ADMIN, TokenClaims, TokenError,
    TokenPair, authenticated, hash_token, jwt_auth_middleware, require_roles, with_roles,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use response::{ApiResponse, Envelope, created, ok};

pub use extractors::{UuidPath, UuidPathPair, ValidatedJson, ValidatedQuery};
