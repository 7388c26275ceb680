//! Self-service API key management endpoints.
//!
//! Only reachable from a logged-in session; see [`SessionUser`].

use actix_web::{HttpResponse, get, post, web};
use secrecy::ExposeSecret;

use crate::auth::SessionUser;
use crate::error::AppResult;
use crate::models::{ApiKeyAction, ApiKeyState, ManageApiKeyRequest, ManageApiKeyResponse};
use crate::services::api_key::KeyLifecycleManager;

/// Configure API key management routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(show_api_key).service(manage_api_key);
}

/// Show the API key management state.
///
/// GET /api/v1/preferences/api-key
#[utoipa::path(
    get,
    path = "/api/v1/preferences/api-key",
    tag = "API keys",
    responses(
        (status = 200, description = "Management page state", body = ManageApiKeyResponse),
        (status = 401, description = "Login required")
    )
)]
#[get("/preferences/api-key")]
pub async fn show_api_key(_session: SessionUser) -> HttpResponse {
    HttpResponse::Ok().json(ManageApiKeyResponse::state(ApiKeyState::Shown))
}

/// Generate or revoke the caller's API key.
///
/// POST /api/v1/preferences/api-key
/// Body: `{"action": "generate" | "revoke"}`
#[utoipa::path(
    post,
    path = "/api/v1/preferences/api-key",
    tag = "API keys",
    request_body = ManageApiKeyRequest,
    responses(
        (status = 200, description = "Key generated or revoked", body = ManageApiKeyResponse),
        (status = 400, description = "Unknown action", body = ManageApiKeyResponse),
        (status = 401, description = "Login required")
    )
)]
#[post("/preferences/api-key")]
pub async fn manage_api_key(
    session: SessionUser,
    body: web::Json<ManageApiKeyRequest>,
    keys: web::Data<KeyLifecycleManager>,
) -> AppResult<HttpResponse> {
    let action = body.action.as_deref().and_then(ApiKeyAction::parse);

    match action {
        Some(ApiKeyAction::Generate) => {
            let token = keys.generate(&session.user).await?;
            Ok(HttpResponse::Ok().json(ManageApiKeyResponse {
                state: ApiKeyState::Generated,
                bearer_token: Some(token.expose_secret().to_string()),
            }))
        }
        Some(ApiKeyAction::Revoke) => {
            keys.revoke(&session.user).await?;
            Ok(HttpResponse::Ok().json(ManageApiKeyResponse::state(ApiKeyState::Revoked)))
        }
        None => Ok(HttpResponse::BadRequest().json(ManageApiKeyResponse::state(ApiKeyState::Error))),
    }
}
