use axum::{
    Router,
    extract::State,
    routing::{delete, get, patch},
};
use axum_helpers::{
    ADMIN_ONLY, ApiResponse, Envelope, JwtAuth, STAFF_OR_ADMIN, UuidPath, ValidatedJson,
    ValidatedQuery, created,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    ok, with_roles,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateRole, UpdateUser, User, UserFilter};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for user management
#[derive(OpenApi)]
#[openapi(
    paths(create_user, list_users, get_user, update_user, update_role, delete_user),
    components(
        schemas(User, CreateUser, UpdateUser, UpdateRole),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "User management (staff and admin)"))
)]
pub struct ApiDoc;

/// User management routes. Reading and editing needs staff or admin;
/// role changes and deletion are admin-only.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt: &JwtAuth) -> Router {
    let service = Arc::new(service);

    Router::new()
        .route(
            "/",
            with_roles(get(list_users).post(create_user), jwt, STAFF_OR_ADMIN),
        )
        .route(
            "/{user_id}",
            with_roles(get(get_user).patch(update_user), jwt, STAFF_OR_ADMIN)
                .merge(with_roles(delete(delete_user), jwt, ADMIN_ONLY)),
        )
        .route("/{user_id}/role", with_roles(patch(update_role), jwt, ADMIN_ONLY))
        .with_state(service)
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "User created", body = ApiResponse<User>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<Envelope<User>> {
    let user = service.create_user(input).await?;
    Ok(created("user created", user))
}

/// List users, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(UserFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users", body = ApiResponse<Vec<User>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<UserFilter>,
) -> UserResult<Envelope<Vec<User>>> {
    let users = service.list_users(filter).await?;
    Ok(ok("users retrieved", users))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{user_id}",
    tag = TAG,
    params(("user_id" = Uuid, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User found", body = ApiResponse<User>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Envelope<User>> {
    let user = service.get_user(id).await?;
    Ok(ok("user retrieved", user))
}

/// Update a user's name
#[utoipa::path(
    patch,
    path = "/{user_id}",
    tag = TAG,
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUser,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Envelope<User>> {
    let user = service.update_user(id, input).await?;
    Ok(ok("user updated", user))
}

/// Change a user's role (admin only)
#[utoipa::path(
    patch,
    path = "/{user_id}/role",
    tag = TAG,
    params(("user_id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRole,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<User>),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_role<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRole>,
) -> UserResult<Envelope<User>> {
    let user = service.update_role(id, input.role).await?;
    Ok(ok("user role updated", user))
}

/// Delete a user (admin only)
#[utoipa::path(
    delete,
    path = "/{user_id}",
    tag = TAG,
    params(("user_id" = Uuid, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Envelope<()>> {
    service.delete_user(id).await?;
    Ok(ok("user deleted", ()))
}
