//! Bearer token authentication middleware.
//!
//! Runs [`BearerAuthenticator`] on every request and binds the user to the
//! request extensions on success. Failed authentication never rejects the
//! request; handlers see an anonymous caller instead.

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, web};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

use crate::auth::{AuthenticatedUser, BearerAuthenticator};

/// Bearer authentication middleware factory.
///
/// Requires a `web::Data<BearerAuthenticator>` in the app data. Register it
/// inside any session middleware so an existing session identity wins.
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Bearer authentication middleware service.
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = req.app_data::<web::Data<BearerAuthenticator>>().cloned();

        Box::pin(async move {
            let Some(authenticator) = authenticator else {
                tracing::error!("BearerAuth middleware registered without a BearerAuthenticator");
                return Err(actix_web::error::ErrorInternalServerError(
                    "Internal configuration error",
                ));
            };

            // Socket peer only; forwarding headers are client-controlled.
            let client_addr = req
                .peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            let outcome = {
                // A header that is not valid UTF-8 is present but unparsable.
                let authorization = req
                    .headers()
                    .get(header::AUTHORIZATION)
                    .map(|v| v.to_str().unwrap_or_default());
                authenticator
                    .authenticate(&req, authorization, &client_addr)
                    .await?
            };

            if let Some(user) = outcome.into_user() {
                req.extensions_mut().insert(AuthenticatedUser::bearer(user));
            }

            service.call(req).await
        })
    }
}
