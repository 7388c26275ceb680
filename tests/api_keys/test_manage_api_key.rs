//! Self-service key management endpoint.

use actix_web::{http::header, test};
use serde_json::Value;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_show_requires_session() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/preferences/api-key")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/v1/preferences/api-key")
        .insert_header((SESSION_HEADER, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["state"], "shown");
}

#[actix_rt::test]
async fn test_generate_returns_token_once() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;

    let (status, body) = manage_key(&app, "alice", "generate").await;
    assert_eq!(status, 200);
    assert_eq!(body["state"], "generated");

    let token = body["bearer_token"].as_str().unwrap();
    let (username, secret) = token.split_once(':').unwrap();
    assert_eq!(username, "alice");
    assert!(secret.len() >= 32);

    let stored = ctx.repo.get("alice").unwrap().api_key.unwrap();
    assert!(!stored.contains(secret));

    // The page state never includes the token again.
    let req = test::TestRequest::get()
        .uri("/api/v1/preferences/api-key")
        .insert_header((SESSION_HEADER, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.get("bearer_token").is_none());
}

#[actix_rt::test]
async fn test_revoke_without_key_is_noop() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;

    let (status, body) = manage_key(&app, "alice", "revoke").await;
    assert_eq!(status, 200);
    assert_eq!(body["state"], "revoked");
    assert!(ctx.repo.get("alice").unwrap().api_key.is_none());
}

#[actix_rt::test]
async fn test_unknown_action_is_error_state() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;

    let (status, body) = manage_key(&app, "alice", "rotate").await;
    assert_eq!(status, 400);
    assert_eq!(body["state"], "error");

    let req = test::TestRequest::post()
        .uri("/api/v1/preferences/api-key")
        .insert_header((SESSION_HEADER, "alice"))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_bearer_identity_cannot_manage_keys() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;
    let token = generate_token(&app, "alice").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/preferences/api-key")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(serde_json::json!({ "action": "generate" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // The original key is still the active one.
    let (_, body) = whoami(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(body["authenticated"], true);
}

#[actix_rt::test]
async fn test_anonymous_cannot_manage_keys() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/preferences/api-key")
        .set_json(serde_json::json!({ "action": "generate" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert!(ctx.repo.get("alice").unwrap().api_key.is_none());
}
