//! HTTP handlers for the Orders API

use axum::{
    Router,
    extract::State,
    routing::{get, patch},
};
use axum_helpers::{
    ApiResponse, AuthUser, Envelope, JwtAuth, STAFF_OR_ADMIN, UuidPath, ValidatedJson,
    ValidatedQuery, authenticated, created,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    ok, with_roles,
};
use domain_addresses::AddressRepository;
use domain_carts::CartRepository;
use domain_products::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, Order, OrderAddress, OrderDetail, OrderFilter, OrderItem, OrderStatus,
    OrderSummary, UpdateOrderStatus,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

pub const TAG: &str = "orders";

/// OpenAPI documentation for Orders API
#[derive(OpenApi)]
#[openapi(
    paths(create_order, list_orders, get_order, update_order_status),
    components(
        schemas(
            Order, OrderItem, OrderAddress, OrderDetail, OrderSummary, OrderStatus,
            OrderFilter, CreateOrder, UpdateOrderStatus
        ),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Checkout and order tracking"))
)]
pub struct ApiDoc;

type SharedService<O, C, A, P> = Arc<OrderService<O, C, A, P>>;

/// Any signed-in user may check out and read their orders; moving an
/// order through its lifecycle is staff work.
pub fn router<O, C, A, P>(service: OrderService<O, C, A, P>, jwt: &JwtAuth) -> Router
where
    O: OrderRepository + 'static,
    C: CartRepository + 'static,
    A: AddressRepository + 'static,
    P: ProductRepository + 'static,
{
    Router::new()
        .route(
            "/",
            authenticated(get(list_orders).post(create_order), jwt),
        )
        .route("/{order_id}", authenticated(get(get_order), jwt))
        .route(
            "/{order_id}/status",
            with_roles(patch(update_order_status), jwt, STAFF_OR_ADMIN),
        )
        .with_state(Arc::new(service))
}

/// Check out the caller's cart
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateOrder,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderDetail>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<O, C, A, P>(
    State(service): State<SharedService<O, C, A, P>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<Envelope<OrderDetail>>
where
    O: OrderRepository + 'static,
    C: CartRepository + 'static,
    A: AddressRepository + 'static,
    P: ProductRepository + 'static,
{
    let order = service.create_order(&user, input).await?;
    Ok(created("order created", order))
}

/// List orders, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(OrderFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Orders", body = ApiResponse<Vec<OrderSummary>>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<O, C, A, P>(
    State(service): State<SharedService<O, C, A, P>>,
    user: AuthUser,
    ValidatedQuery(filter): ValidatedQuery<OrderFilter>,
) -> OrderResult<Envelope<Vec<OrderSummary>>>
where
    O: OrderRepository + 'static,
    C: CartRepository + 'static,
    A: AddressRepository + 'static,
    P: ProductRepository + 'static,
{
    let orders = service.list_orders(&user, filter).await?;
    Ok(ok("orders retrieved", orders))
}

/// Get an order with its items and shipping address
#[utoipa::path(
    get,
    path = "/{order_id}",
    tag = TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order found", body = ApiResponse<OrderDetail>),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<O, C, A, P>(
    State(service): State<SharedService<O, C, A, P>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> OrderResult<Envelope<OrderDetail>>
where
    O: OrderRepository + 'static,
    C: CartRepository + 'static,
    A: AddressRepository + 'static,
    P: ProductRepository + 'static,
{
    let order = service.get_order(&user, id).await?;
    Ok(ok("order retrieved", order))
}

/// Move an order to a new status
#[utoipa::path(
    patch,
    path = "/{order_id}/status",
    tag = TAG,
    params(("order_id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatus,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Order>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order_status<O, C, A, P>(
    State(service): State<SharedService<O, C, A, P>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatus>,
) -> OrderResult<Envelope<Order>>
where
    O: OrderRepository + 'static,
    C: CartRepository + 'static,
    A: AddressRepository + 'static,
    P: ProductRepository + 'static,
{
    let order = service.update_status(id, input.status).await?;
    Ok(ok("order status updated", order))
}
