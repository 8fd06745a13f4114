//! HTTP handlers for the Products API

use axum::{
    Router,
    extract::State,
    routing::{delete, get, patch, post},
};
use axum_helpers::{
    ApiResponse, Envelope, JwtAuth, STAFF_OR_ADMIN, UuidPath, UuidPathPair, ValidatedJson,
    ValidatedQuery, created,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    ok, with_roles,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    AddStock, AssignCategories, AssignedCategory, CreateProduct, Product, ProductFilter,
    ProductOrderBy, SortDirection, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const TAG: &str = "products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        add_stock,
        list_product_categories,
        assign_categories,
        unassign_category,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, ProductFilter, ProductOrderBy,
            SortDirection, AddStock, AssignCategories, AssignedCategory
        ),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product catalog"))
)]
pub struct ApiDoc;

/// Catalog reads are public; every write needs staff or admin.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>, jwt: &JwtAuth) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products).merge(with_roles(post(create_product), jwt, STAFF_OR_ADMIN)),
        )
        .route(
            "/{product_id}",
            get(get_product).merge(with_roles(
                patch(update_product).delete(delete_product),
                jwt,
                STAFF_OR_ADMIN,
            )),
        )
        .route(
            "/{product_id}/stock",
            with_roles(patch(add_stock), jwt, STAFF_OR_ADMIN),
        )
        .route(
            "/{product_id}/categories",
            get(list_product_categories).merge(with_roles(
                post(assign_categories),
                jwt,
                STAFF_OR_ADMIN,
            )),
        )
        .route(
            "/{product_id}/categories/{category_id}",
            with_roles(delete(unassign_category), jwt, STAFF_OR_ADMIN),
        )
        .with_state(shared_service)
}

/// List products with optional category filter and sorting
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Products", body = ApiResponse<Vec<Product>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<ProductFilter>,
) -> ProductResult<Envelope<Vec<Product>>> {
    let products = service.list_products(filter).await?;
    Ok(ok("products retrieved", products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Envelope<Product>> {
    let product = service.create_product(input).await?;
    Ok(created("product created", product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{product_id}",
    tag = TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Envelope<Product>> {
    let product = service.get_product(id).await?;
    Ok(ok("product retrieved", product))
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{product_id}",
    tag = TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Envelope<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(ok("product updated", product))
}

/// Delete a product no order refers to
#[utoipa::path(
    delete,
    path = "/{product_id}",
    tag = TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Envelope<()>> {
    service.delete_product(id).await?;
    Ok(ok("product deleted", ()))
}

/// Add stock to a product
#[utoipa::path(
    patch,
    path = "/{product_id}/stock",
    tag = TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    request_body = AddStock,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stock added", body = ApiResponse<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_stock<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<AddStock>,
) -> ProductResult<Envelope<Product>> {
    let product = service.add_stock(id, input.quantity).await?;
    Ok(ok("stock added", product))
}

/// Categories linked to a product
#[utoipa::path(
    get,
    path = "/{product_id}/categories",
    tag = TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Linked categories", body = ApiResponse<Vec<AssignedCategory>>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_product_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Envelope<Vec<AssignedCategory>>> {
    let categories = service.list_categories(id).await?;
    Ok(ok("product categories retrieved", categories))
}

/// Link categories to a product
#[utoipa::path(
    post,
    path = "/{product_id}/categories",
    tag = TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    request_body = AssignCategories,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Categories assigned", body = ApiResponse<Vec<AssignedCategory>>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn assign_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<AssignCategories>,
) -> ProductResult<Envelope<Vec<AssignedCategory>>> {
    let categories = service.assign_categories(id, input.category_ids).await?;
    Ok(created("categories assigned", categories))
}

/// Unlink a category from a product
#[utoipa::path(
    delete,
    path = "/{product_id}/categories/{category_id}",
    tag = TAG,
    params(
        ("product_id" = Uuid, Path, description = "Product ID"),
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category unassigned"),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn unassign_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPathPair(product_id, category_id): UuidPathPair,
) -> ProductResult<Envelope<()>> {
    service.unassign_category(product_id, category_id).await?;
    Ok(ok("category unassigned", ()))
}
