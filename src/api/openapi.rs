//! OpenAPI documentation configuration.

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::{api, error, models, services};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelf Auth Server",
        version = "0.1.0",
        description = "API key (bearer token) authentication and self-service key management"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Identity
        api::account::me,
        // API key management
        services::manage_api_key::show_api_key,
        services::manage_api_key::manage_api_key,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            models::IdentityResponse,
            models::ApiKeyState,
            models::ManageApiKeyRequest,
            models::ManageApiKeyResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Identity", description = "Who the caller is authenticated as"),
        (name = "API keys", description = "Self-service API key management")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add bearer security scheme (`Authorization: Bearer username:token`).
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            );
        }
    }
}

/// Serve the OpenAPI document.
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
