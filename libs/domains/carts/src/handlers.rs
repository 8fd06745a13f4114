use axum::{
    Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{delete, get},
};
use axum_helpers::{
    ApiResponse, AuthUser, Envelope, JwtAuth, UuidPath, ValidatedJson, created,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware, ok,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CartResult;
use crate::models::{AddToCart, CartItem, CartLine};
use crate::repository::CartRepository;
use crate::service::CartService;

pub const TAG: &str = "cart";

/// OpenAPI documentation for the cart API
#[derive(OpenApi)]
#[openapi(
    paths(add_item, get_cart, clear_cart, remove_item),
    components(
        schemas(AddToCart, CartItem, CartLine),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "The caller's shopping cart"))
)]
pub struct ApiDoc;

pub fn router<R: CartRepository + 'static>(service: CartService<R>, jwt: &JwtAuth) -> Router {
    Router::new()
        .route("/", get(get_cart).post(add_item))
        .route("/clear", delete(clear_cart))
        .route("/remove/{product_id}", delete(remove_item))
        .route_layer(from_fn_with_state(jwt.clone(), jwt_auth_middleware))
        .with_state(Arc::new(service))
}

/// Add a product to the cart
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = AddToCart,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Cart line saved", body = ApiResponse<CartItem>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<AddToCart>,
) -> CartResult<Envelope<CartItem>> {
    let item = service.add_item(&user, input).await?;
    Ok(created("item added to cart", item))
}

/// The caller's cart lines
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart lines", body = ApiResponse<Vec<CartLine>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    user: AuthUser,
) -> CartResult<Envelope<Vec<CartLine>>> {
    let lines = service.get_cart(&user).await?;
    Ok(ok("cart retrieved", lines))
}

/// Remove every line from the cart
#[utoipa::path(
    delete,
    path = "/clear",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart cleared"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn clear_cart<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    user: AuthUser,
) -> CartResult<Envelope<()>> {
    service.clear_cart(&user).await?;
    Ok(ok("cart cleared", ()))
}

/// Remove one product from the cart
#[utoipa::path(
    delete,
    path = "/remove/{product_id}",
    tag = TAG,
    params(("product_id" = Uuid, Path, description = "Product ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart line removed"),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    user: AuthUser,
    UuidPath(product_id): UuidPath,
) -> CartResult<Envelope<()>> {
    service.remove_item(&user, product_id).await?;
    Ok(ok("item removed from cart", ()))
}
