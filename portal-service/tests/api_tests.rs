mod common;

use auth::Identity;
use auth::TokenIssuer;
use axum::http::StatusCode;
use common::TestApp;
use common::COOKIE_NAME;

fn tamper_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').expect("Token has three segments");
    let mut chars: Vec<char> = signature.chars().collect();
    chars[5] = if chars[5] == 'A' { 'B' } else { 'A' };
    format!("{}.{}", head, chars.into_iter().collect::<String>())
}

#[tokio::test]
async fn test_register_creates_user_with_default_role() {
    let app = TestApp::new();

    let response = app.register("alice", "s3cret-password").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["status_code"], 201);
    assert_eq!(response.body["data"]["username"], "alice");
    assert_eq!(response.body["data"]["role"], "USER");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = TestApp::new();
    app.register("alice", "s3cret-password").await;

    let response = app.register("alice", "another-password").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_weak_password_and_bad_username() {
    let app = TestApp::new();

    let weak = app.register("alice", "short").await;
    assert_eq!(weak.status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_name = app.register("al ice", "s3cret-password").await;
    assert_eq!(bad_name.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_sets_hardened_cookie() {
    let app = TestApp::new();
    app.register("alice", "s3cret-password").await;

    let response = app.login("alice", "s3cret-password").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");
    assert!(response.body["data"]["token"].is_string());
    assert!(response.body["data"]["expires_at"].is_string());

    let cookie = response.token_cookie().expect("Login sets the token cookie");
    assert!(cookie.starts_with(&format!("{}=", COOKIE_NAME)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.register("alice", "s3cret-password").await;

    let wrong_password = app.login("alice", "wrong-password").await;
    let unknown_user = app.login("mallory", "s3cret-password").await;
    let invalid_name = app.login("x", "s3cret-password").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.body["data"]["message"],
        "Invalid credentials"
    );
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.body, invalid_name.body);
    assert!(wrong_password.token_cookie().is_none());
    assert!(unknown_user.token_cookie().is_none());
}

#[tokio::test]
async fn test_home_with_cookie_greets_user() {
    let app = TestApp::new();
    app.register("alice", "s3cret-password").await;
    let login = app.login("alice", "s3cret-password").await;
    let cookie = login.cookie_pair().expect("Login sets the token cookie");

    let response = app.get_with_cookie("/home", &cookie).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["greeting"], "Hello, ");
    assert_eq!(response.body["data"]["name"], "alice");
}

#[tokio::test]
async fn test_home_with_bearer_token_greets_user() {
    let app = TestApp::new();
    let token = app.signed_in("alice", "s3cret-password").await;

    let response = app.get_with_bearer("/home", &token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "alice");
}

#[tokio::test]
async fn test_home_without_token_is_unauthenticated() {
    let app = TestApp::new();

    let response = app.get("/home").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["data"]["message"], "Unauthenticated");
}

#[tokio::test]
async fn test_unknown_protected_path_without_token_is_unauthenticated() {
    let app = TestApp::new();

    let response = app.get("/admin/settings").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_exempt_root_without_token() {
    let app = TestApp::new();

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "ok");
    assert_eq!(response.body["data"]["authenticated"], false);
}

#[tokio::test]
async fn test_exempt_root_reports_valid_token() {
    let app = TestApp::new();
    let token = app.signed_in("alice", "s3cret-password").await;

    let response = app.get_with_bearer("/", &token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["authenticated"], true);
}

#[tokio::test]
async fn test_tampered_token_is_rejected_on_protected_path_only() {
    let app = TestApp::new();
    let token = app.signed_in("alice", "s3cret-password").await;
    let tampered = tamper_signature(&token);

    let protected = app.get_with_bearer("/home", &tampered).await;
    assert_eq!(protected.status, StatusCode::UNAUTHORIZED);

    let exempt = app.get_with_bearer("/", &tampered).await;
    assert_eq!(exempt.status, StatusCode::OK);
    assert_eq!(exempt.body["data"]["authenticated"], false);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let other = auth::SigningSecret::new("another-secret-key-that-is-at-least-32-bytes")
        .expect("Secret is long enough");
    let forged = TokenIssuer::with_default_ttl(&other)
        .issue(&Identity::new("alice", Some("USER".to_string())))
        .expect("Failed to issue token");

    let response = app.get_with_bearer("/home", forged.token.as_str()).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected_on_protected_path() {
    let app = TestApp::new();
    let issued_two_hours_ago = chrono::Utc::now() - chrono::Duration::hours(2);
    let expired = TokenIssuer::with_default_ttl(&app.secret)
        .issue_at(
            &Identity::new("alice", Some("USER".to_string())),
            issued_two_hours_ago,
        )
        .expect("Failed to issue token");

    let protected = app.get_with_bearer("/home", expired.token.as_str()).await;
    assert_eq!(protected.status, StatusCode::UNAUTHORIZED);

    let exempt = app.get_with_bearer("/", expired.token.as_str()).await;
    assert_eq!(exempt.status, StatusCode::OK);
}

#[tokio::test]
async fn test_short_lived_token_expires() {
    let app = TestApp::with_ttl(chrono::Duration::milliseconds(1));
    let token = app.signed_in("alice", "s3cret-password").await;

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let response = app.get_with_bearer("/home", &token).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_reports_subject_and_roles() {
    let app = TestApp::new();
    let token = app.signed_in("alice", "s3cret-password").await;

    let response = app.get_with_bearer("/api/me", &token).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["subject"], "alice");
    assert_eq!(response.body["data"]["roles"], serde_json::json!(["USER"]));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    app.register("alice", "s3cret-password").await;
    let login = app.login("alice", "s3cret-password").await;
    let cookie = login.cookie_pair().expect("Login sets the token cookie");

    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/auth/logout")
        .header(axum::http::header::COOKIE, &cookie)
        .body(axum::body::Body::empty())
        .expect("Failed to build request");
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["logged_out"], true);

    let cleared = response.token_cookie().expect("Logout overwrites the cookie");
    assert!(cleared.starts_with(&format!("{}=;", COOKIE_NAME)));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_login_path_is_exempt_even_with_stale_cookie() {
    let app = TestApp::new();
    app.register("alice", "s3cret-password").await;

    let request = axum::http::Request::builder()
        .method(axum::http::Method::POST)
        .uri("/auth/login")
        .header(axum::http::header::COOKIE, "jwt=not.a.token")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"username":"alice","password":"s3cret-password"}"#,
        ))
        .expect("Failed to build request");
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
}
