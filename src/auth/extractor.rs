//! Actix-web extractors for the identity bound to a request.
//!
//! # Security
//! - Identities are read from request extensions only; nothing here parses headers
//! - `SessionUser` refuses bearer-authenticated callers, so an API key can never
//!   be used to mint or revoke API keys

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{Ready, ready};

use super::{AuthSource, AuthenticatedUser};
use crate::error::AppError;
use crate::models::User;

/// Extractor that requires an identity established by the primary session.
///
/// ```ignore
/// async fn manage(session: SessionUser) -> impl Responder {
///     // session.user is the logged-in user
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user: User,
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<AuthenticatedUser>() {
            Some(auth) if auth.source == AuthSource::Session => Ok(SessionUser {
                user: auth.user.clone(),
            }),
            Some(_) => Err(AppError::Unauthorized(
                "API keys can only be managed from a logged-in session".to_string(),
            )),
            None => Err(AppError::Unauthorized("Login required".to_string())),
        };
        ready(result)
    }
}

/// Extractor for the request identity, if any. Never fails: requests whose
/// authentication failed or was absent are simply anonymous.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<AuthenticatedUser>);

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(CurrentUser(
            req.extensions().get::<AuthenticatedUser>().cloned(),
        )))
    }
}
