use axum::{
    Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
};
use axum_helpers::{
    ApiResponse, AuthUser, Envelope, JwtAuth, UuidPath, ValidatedJson, created,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware, ok,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::AddressResult;
use crate::models::{Address, CreateAddress, UpdateAddress};
use crate::repository::AddressRepository;
use crate::service::AddressService;

pub const TAG: &str = "addresses";

/// OpenAPI documentation for Addresses API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_address,
        list_user_addresses,
        get_address,
        update_address,
        delete_address,
        set_default_address
    ),
    components(
        schemas(Address, CreateAddress, UpdateAddress),
        responses(
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Shipping addresses"))
)]
pub struct ApiDoc;

/// Every address route needs a bearer token.
pub fn router<R: AddressRepository + 'static>(service: AddressService<R>, jwt: &JwtAuth) -> Router {
    Router::new()
        .route("/", post(create_address))
        .route("/user/{user_id}", get(list_user_addresses))
        .route(
            "/{address_id}",
            get(get_address).patch(update_address).delete(delete_address),
        )
        .route("/{address_id}/default", patch(set_default_address))
        .route_layer(from_fn_with_state(jwt.clone(), jwt_auth_middleware))
        .with_state(Arc::new(service))
}

/// Add an address for the caller
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateAddress,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Address created", body = ApiResponse<Address>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_address<R: AddressRepository + 'static>(
    State(service): State<Arc<AddressService<R>>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateAddress>,
) -> AddressResult<Envelope<Address>> {
    let address = service.create_address(&user, input).await?;
    Ok(created("address created", address))
}

/// List a user's addresses, newest first
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = TAG,
    params(("user_id" = Uuid, Path, description = "Owner ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Addresses", body = ApiResponse<Vec<Address>>),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_user_addresses<R: AddressRepository + 'static>(
    State(service): State<Arc<AddressService<R>>>,
    user: AuthUser,
    UuidPath(user_id): UuidPath,
) -> AddressResult<Envelope<Vec<Address>>> {
    let addresses = service.list_addresses(&user, user_id).await?;
    Ok(ok("addresses retrieved", addresses))
}

/// Get an address by ID
#[utoipa::path(
    get,
    path = "/{address_id}",
    tag = TAG,
    params(("address_id" = Uuid, Path, description = "Address ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Address found", body = ApiResponse<Address>),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_address<R: AddressRepository + 'static>(
    State(service): State<Arc<AddressService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> AddressResult<Envelope<Address>> {
    let address = service.get_address(&user, id).await?;
    Ok(ok("address retrieved", address))
}

/// Partially update an address
#[utoipa::path(
    patch,
    path = "/{address_id}",
    tag = TAG,
    params(("address_id" = Uuid, Path, description = "Address ID")),
    request_body = UpdateAddress,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Address updated", body = ApiResponse<Address>),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_address<R: AddressRepository + 'static>(
    State(service): State<Arc<AddressService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateAddress>,
) -> AddressResult<Envelope<Address>> {
    let address = service.update_address(&user, id, input).await?;
    Ok(ok("address updated", address))
}

/// Delete an address
#[utoipa::path(
    delete,
    path = "/{address_id}",
    tag = TAG,
    params(("address_id" = Uuid, Path, description = "Address ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Address deleted"),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_address<R: AddressRepository + 'static>(
    State(service): State<Arc<AddressService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> AddressResult<Envelope<()>> {
    service.delete_address(&user, id).await?;
    Ok(ok("address deleted", ()))
}

/// Make this the owner's default address
#[utoipa::path(
    patch,
    path = "/{address_id}/default",
    tag = TAG,
    params(("address_id" = Uuid, Path, description = "Address ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Default address set", body = ApiResponse<Address>),
        (status = 400, response = BadRequestResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn set_default_address<R: AddressRepository + 'static>(
    State(service): State<Arc<AddressService<R>>>,
    user: AuthUser,
    UuidPath(id): UuidPath,
) -> AddressResult<Envelope<Address>> {
    let address = service.set_default(&user, id).await?;
    Ok(ok("default address set", address))
}
