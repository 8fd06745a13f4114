use axum::{
    Router,
    extract::State,
    routing::{get, patch, post},
};
use axum_helpers::{
    ApiResponse, Envelope, JwtAuth, STAFF_OR_ADMIN, UuidPath, ValidatedJson, created,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    ok, with_roles,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

pub const TAG: &str = "categories";

/// OpenAPI documentation for Categories API
#[derive(OpenApi)]
#[openapi(
    paths(create_category, list_categories, get_category, update_category, delete_category),
    components(
        schemas(Category, CreateCategory, UpdateCategory),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product categories"))
)]
pub struct ApiDoc;

/// Reads are public; writes need staff or admin.
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>, jwt: &JwtAuth) -> Router {
    Router::new()
        .route(
            "/",
            get(list_categories).merge(with_roles(post(create_category), jwt, STAFF_OR_ADMIN)),
        )
        .route(
            "/{category_id}",
            get(get_category).merge(with_roles(
                patch(update_category).delete(delete_category),
                jwt,
                STAFF_OR_ADMIN,
            )),
        )
        .with_state(Arc::new(service))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = ApiResponse<Category>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CategoryResult<Envelope<Category>> {
    let category = service.create_category(input).await?;
    Ok(created("category created", category))
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Categories", body = ApiResponse<Vec<Category>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CategoryResult<Envelope<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(ok("categories retrieved", categories))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{category_id}",
    tag = TAG,
    params(("category_id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<Category>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CategoryResult<Envelope<Category>> {
    let category = service.get_category(id).await?;
    Ok(ok("category retrieved", category))
}

/// Partially update a category
#[utoipa::path(
    patch,
    path = "/{category_id}",
    tag = TAG,
    params(("category_id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CategoryResult<Envelope<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(ok("category updated", category))
}

/// Delete a category that no product uses
#[utoipa::path(
    delete,
    path = "/{category_id}",
    tag = TAG,
    params(("category_id" = Uuid, Path, description = "Category ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CategoryResult<Envelope<()>> {
    service.delete_category(id).await?;
    Ok(ok("category deleted", ()))
}
