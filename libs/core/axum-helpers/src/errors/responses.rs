//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "error": "internal server error" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - validation failed or a business rule rejected the request",
    content_type = "application/json",
    example = json!({
        "message": "request validation failed",
        "details": {
            "email": [{ "code": "email", "message": null, "params": { "value": "nope" } }]
        }
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "message": "resource not found" })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - missing, invalid or expired token",
    content_type = "application/json",
    example = json!({ "message": "invalid or expired token" })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - role not allowed",
    content_type = "application/json",
    example = json!({ "message": "insufficient role" })
)]
pub struct ForbiddenResponse(pub ErrorResponse);
