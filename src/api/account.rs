//! Identity endpoint.

use actix_web::{HttpResponse, get, web};

use crate::auth::CurrentUser;
use crate::models::IdentityResponse;

/// Report who the caller is authenticated as.
///
/// Anonymous callers get `{"authenticated": false}`; a bad or revoked API key
/// yields exactly the same response.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "Identity",
    responses(
        (status = 200, description = "Caller identity", body = IdentityResponse)
    ),
    security(
        (),
        ("bearer" = [])
    )
)]
#[get("/me")]
pub async fn me(current: CurrentUser) -> HttpResponse {
    let body = match current.0 {
        Some(auth) => IdentityResponse {
            authenticated: true,
            username: Some(auth.user.username),
            via: Some(auth.source.as_str().to_string()),
        },
        None => IdentityResponse {
            authenticated: false,
            username: None,
            via: None,
        },
    };
    HttpResponse::Ok().json(body)
}

/// Configure identity routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me);
}
