//! Shared test helpers for API key tests.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpMessage, http::header, test, web};
use serde_json::Value;
use shelf_auth::auth::{AuthenticatedUser, BearerAuthenticator, CredentialHasher, RecordingAuthLog};
use shelf_auth::db::MemoryUserRepository;
use shelf_auth::middleware::BearerAuth;
use shelf_auth::models::User;
use shelf_auth::services::KeyLifecycleManager;
use shelf_auth::{api, services};

/// Stand-in for the upstream session layer: a request carrying this header is
/// treated as logged in as the named user.
pub const SESSION_HEADER: &str = "X-Test-Session-User";

/// Iteration count for tests; low so debug builds stay fast.
pub const TEST_ITERATIONS: u32 = 2_000;

/// Shared state behind a test app.
pub struct TestContext {
    pub repo: Arc<MemoryUserRepository>,
    pub log: Arc<RecordingAuthLog>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            repo: Arc::new(MemoryUserRepository::new()),
            log: Arc::new(RecordingAuthLog::new()),
        }
    }

    /// Add an active user without an API key.
    pub fn add_user(&self, username: &str) {
        self.repo
            .insert(User::new(username))
            .expect("Failed to insert test user");
    }
}

/// Create a test app with bearer auth, a fake session layer, `/me`, and the
/// key management routes.
pub async fn create_test_app(
    ctx: &TestContext,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let hasher = CredentialHasher::new(TEST_ITERATIONS);
    let authenticator = BearerAuthenticator::new(ctx.repo.clone(), hasher, ctx.log.clone())
        .expect("Failed to create authenticator");
    let key_manager = KeyLifecycleManager::new(ctx.repo.clone(), hasher);
    let repo = ctx.repo.clone();

    test::init_service(
        App::new()
            .wrap(BearerAuth)
            .wrap_fn(move |req, srv| {
                let session_user = req
                    .headers()
                    .get(SESSION_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|name| repo.get(name));
                if let Some(user) = session_user {
                    req.extensions_mut().insert(AuthenticatedUser::session(user));
                }
                srv.call(req)
            })
            .app_data(web::Data::new(authenticator))
            .app_data(web::Data::new(key_manager))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_account_routes)
                    .configure(services::configure_api_key_routes),
            ),
    )
    .await
}

/// GET /api/v1/me with an optional Authorization header.
pub async fn whoami<S>(app: &S, authorization: Option<&str>) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::get()
        .uri("/api/v1/me")
        .peer_addr("192.0.2.10:4444".parse().unwrap());
    if let Some(value) = authorization {
        req = req.insert_header((header::AUTHORIZATION, value));
    }

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// POST /api/v1/preferences/api-key as a session user.
pub async fn manage_key<S>(app: &S, session_user: &str, action: &str) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/preferences/api-key")
        .insert_header((SESSION_HEADER, session_user))
        .set_json(serde_json::json!({ "action": action }))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Generate a key for `username` and return the `username:secret` token.
pub async fn generate_token<S>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = manage_key(app, username, "generate").await;
    assert_eq!(status, 200, "generate failed: {}", body);
    body["bearer_token"]
        .as_str()
        .expect("bearer_token missing")
        .to_string()
}
