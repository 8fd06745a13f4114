use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer_auth` scheme the protected paths refer to.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from /auth/login or /auth/register"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAuth),
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "Users, catalog, carts and orders for the shop backend"
    ),
    servers(
        (url = "/api/v1", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_users::auth_handlers::AuthApiDoc),
        (path = "/users", api = domain_users::handlers::ApiDoc),
        (path = "/addresses", api = domain_addresses::handlers::ApiDoc),
        (path = "/categories", api = domain_categories::handlers::ApiDoc),
        (path = "/products", api = domain_products::handlers::ApiDoc),
        (path = "/cart", api = domain_carts::handlers::ApiDoc),
        (path = "/orders", api = domain_orders::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
