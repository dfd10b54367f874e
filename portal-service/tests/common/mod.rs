use std::sync::Arc;

use auth::Authenticator;
use auth::PathExemptionPolicy;
use auth::RequestAuthenticator;
use auth::SigningSecret;
use auth::TokenIssuer;
use auth::TokenValidator;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use portal_service::inbound::http::router::create_router;
use portal_service::inbound::http::router::CookieSettings;
use portal_service::outbound::repositories::InMemoryCredentialStore;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const COOKIE_NAME: &str = "jwt";

/// Application wired over the in-memory store. Requests run in-process.
pub struct TestApp {
    pub router: Router,
    pub secret: SigningSecret,
}

/// Status, headers and parsed JSON body of a finished request.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Raw `Set-Cookie` header for the token cookie, if any.
    pub fn token_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(&format!("{}=", COOKIE_NAME)))
            .map(str::to_string)
    }

    /// Cookie pair suitable for a `Cookie` request header.
    pub fn cookie_pair(&self) -> Option<String> {
        self.token_cookie()
            .and_then(|cookie| cookie.split(';').next().map(str::to_string))
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ttl(TokenIssuer::default_ttl())
    }

    pub fn with_ttl(ttl: chrono::Duration) -> Self {
        let secret = SigningSecret::new(TEST_SECRET).expect("Test secret is long enough");
        let store = Arc::new(InMemoryCredentialStore::new());

        let issuer = TokenIssuer::new(&secret, ttl);
        let authenticator =
            Arc::new(Authenticator::new(store, issuer).expect("Failed to build authenticator"));
        let request_authenticator = Arc::new(RequestAuthenticator::new(
            PathExemptionPolicy::default(),
            Arc::new(TokenValidator::new(&secret)),
        ));
        let cookie = CookieSettings {
            name: COOKIE_NAME.to_string(),
            secure: true,
        };

        let router = create_router(authenticator, request_authenticator, cookie);

        Self { router, secret }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn get_with_bearer(&self, path: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/auth/register",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/auth/login",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Register the user and return the token from a successful login.
    pub async fn signed_in(&self, username: &str, password: &str) -> String {
        let registered = self.register(username, password).await;
        assert_eq!(registered.status, StatusCode::CREATED);

        let logged_in = self.login(username, password).await;
        assert_eq!(logged_in.status, StatusCode::OK);

        logged_in.body["data"]["token"]
            .as_str()
            .expect("Login response carries a token")
            .to_string()
    }
}
