//! Users Domain
//!
//! User accounts, password hashing and JWT authentication.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /users and /auth endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← UserService, AuthService (hashing, token rotation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← UserRepository, AuthTokenRepository (+ Postgres impls)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_users::{AuthService, PgAuthTokenRepository, PgUserRepository, UserService};
//!
//! let users = UserService::new(PgUserRepository::new(db.clone()));
//! let auth = AuthService::new(
//!     PgUserRepository::new(db.clone()),
//!     PgAuthTokenRepository::new(db.clone()),
//!     db,
//!     jwt.clone(),
//! );
//!
//! let router = Router::new()
//!     .nest("/users", domain_users::handlers::router(users, &jwt))
//!     .nest("/auth", domain_users::auth_handlers::router(auth, &jwt));
//! ```

pub mod auth;
pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use auth::AuthService;
pub use error::{UserError, UserResult};
pub use models::{
    AuthToken, CreateUser, LoginRequest, NewUser, RefreshTokenRequest, UpdateRole, UpdateUser,
    User, UserFilter,
};
pub use postgres::{PgAuthTokenRepository, PgUserRepository};
pub use repository::{AuthTokenRepository, UserRepository};
pub use service::UserService;
