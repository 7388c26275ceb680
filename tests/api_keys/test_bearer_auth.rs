//! Bearer authentication through the middleware.

use shelf_auth::auth::audit::AuthEventKind;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_generated_key_authenticates() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;

    let token = generate_token(&app, "alice").await;
    assert!(token.starts_with("alice:"));

    let (status, body) = whoami(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, 200);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["via"], "bearer");
}

#[actix_rt::test]
async fn test_scheme_case_insensitive() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;
    let token = generate_token(&app, "alice").await;

    for scheme in ["bearer", "BEARER", "Bearer"] {
        let (_, body) = whoami(&app, Some(&format!("{scheme} {token}"))).await;
        assert_eq!(body["authenticated"], true, "scheme {}", scheme);
    }
}

#[actix_rt::test]
async fn test_failures_look_anonymous() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    ctx.add_user("bob");
    let app = create_test_app(&ctx).await;
    generate_token(&app, "alice").await;

    let (_, anonymous) = whoami(&app, None).await;
    assert_eq!(anonymous["authenticated"], false);

    for header in [
        "Bearer alice:wrong-secret",
        "Bearer bob:anything",
        "Bearer nobody:anything",
        "Bearer alice",
        "Bearer alice:",
        "Basic YWxpY2U6c2VrcmV0",
    ] {
        let (status, body) = whoami(&app, Some(header)).await;
        assert_eq!(status, 200, "{}", header);
        assert_eq!(body, anonymous, "{} should look anonymous", header);
    }
}

#[actix_rt::test]
async fn test_wrong_secret_for_same_user_is_mismatch() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;
    generate_token(&app, "alice").await;
    ctx.log.clear();

    whoami(&app, Some("Bearer alice:not-the-right-secret")).await;

    let events = ctx.log.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, AuthEventKind::BadKey);
    assert_eq!(events[0].username.as_deref(), Some("alice"));
    assert_eq!(events[0].client_addr, "192.0.2.10");
}

#[actix_rt::test]
async fn test_revoked_key_stops_working() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;
    let token = generate_token(&app, "alice").await;

    let (status, body) = manage_key(&app, "alice", "revoke").await;
    assert_eq!(status, 200);
    assert_eq!(body["state"], "revoked");
    ctx.log.clear();

    let (_, body) = whoami(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(body["authenticated"], false);
    assert_eq!(ctx.log.events()[0].kind, AuthEventKind::KeyUnavailable);
}

#[actix_rt::test]
async fn test_regenerate_invalidates_previous_key() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;

    let first = generate_token(&app, "alice").await;
    let second = generate_token(&app, "alice").await;
    assert_ne!(first, second);

    let (_, body) = whoami(&app, Some(&format!("Bearer {first}"))).await;
    assert_eq!(body["authenticated"], false);

    let (_, body) = whoami(&app, Some(&format!("Bearer {second}"))).await;
    assert_eq!(body["authenticated"], true);
}

#[actix_rt::test]
async fn test_inactive_user_cannot_authenticate() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;
    let token = generate_token(&app, "alice").await;

    ctx.repo.set_active("alice", false).unwrap();
    ctx.log.clear();

    let (_, body) = whoami(&app, Some(&format!("Bearer {token}"))).await;
    assert_eq!(body["authenticated"], false);
    assert_eq!(ctx.log.events()[0].kind, AuthEventKind::KeyUnavailable);
}

#[actix_rt::test]
async fn test_session_identity_takes_precedence() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    ctx.add_user("bob");
    let app = create_test_app(&ctx).await;
    let bob_token = generate_token(&app, "bob").await;
    ctx.log.clear();

    let req = actix_web::test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header((SESSION_HEADER, "alice"))
        .insert_header(("Authorization", format!("Bearer {bob_token}")))
        .to_request();
    let body: serde_json::Value = actix_web::test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["username"], "alice");
    assert_eq!(body["via"], "session");
    assert!(ctx.log.events().is_empty(), "bearer auth should not run");
}

#[actix_rt::test]
async fn test_secret_never_logged() {
    let ctx = TestContext::new();
    ctx.add_user("alice");
    let app = create_test_app(&ctx).await;
    let token = generate_token(&app, "alice").await;
    let secret = token.split_once(':').unwrap().1.to_string();

    whoami(&app, Some(&format!("Bearer {token}"))).await;
    whoami(&app, Some(&format!("Bearer nobody:{secret}"))).await;
    whoami(&app, Some(&format!("Bearer {secret}"))).await;
    manage_key(&app, "alice", "revoke").await;
    whoami(&app, Some(&format!("Bearer {token}"))).await;

    let lines = ctx.log.lines();
    assert_eq!(lines.len(), 4);
    for line in lines {
        assert!(!line.contains(&secret), "secret leaked: {}", line);
    }
}

#[actix_rt::test]
async fn test_forwarded_headers_do_not_change_logged_address() {
    let ctx = TestContext::new();
    let app = create_test_app(&ctx).await;

    let req = actix_web::test::TestRequest::get()
        .uri("/api/v1/me")
        .peer_addr("192.0.2.10:4444".parse().unwrap())
        .insert_header(("X-Forwarded-For", "10.9.9.9"))
        .insert_header(("Forwarded", "for=10.8.8.8"))
        .insert_header(("Authorization", "Bearer nobody:whatever"))
        .to_request();
    actix_web::test::call_service(&app, req).await;

    let events = ctx.log.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, AuthEventKind::UnknownUser);
    assert_eq!(events[0].client_addr, "192.0.2.10");
    assert!(!events[0].line.contains("10.9.9.9"));
    assert!(!events[0].line.contains("10.8.8.8"));
}
