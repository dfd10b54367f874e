use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::CredentialStore;
use auth::RequestAuthenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::home::home;
use super::handlers::home::root;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_identity;

/// How the token carrier cookie is written.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

impl CookieSettings {
    /// HttpOnly, SameSite=Strict cookie on `/` living as long as the token.
    pub fn token_cookie(&self, token: String, ttl: chrono::Duration) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::seconds(ttl.num_seconds()))
            .build()
    }

    /// Empty cookie that expires immediately, overwriting the token.
    pub fn cleared_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), String::new()))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::ZERO)
            .build()
    }
}

pub struct AppState<S>
where
    S: CredentialStore,
{
    pub authenticator: Arc<Authenticator<S>>,
    pub request_authenticator: Arc<RequestAuthenticator>,
    pub cookie: CookieSettings,
}

impl<S> Clone for AppState<S>
where
    S: CredentialStore,
{
    fn clone(&self) -> Self {
        Self {
            authenticator: Arc::clone(&self.authenticator),
            request_authenticator: Arc::clone(&self.request_authenticator),
            cookie: self.cookie.clone(),
        }
    }
}

pub fn create_router<S>(
    authenticator: Arc<Authenticator<S>>,
    request_authenticator: Arc<RequestAuthenticator>,
    cookie: CookieSettings,
) -> Router
where
    S: CredentialStore,
{
    let state = AppState {
        authenticator,
        request_authenticator,
        cookie,
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/auth/login", post(login::<S>))
        .route("/auth/register", post(register::<S>))
        .route("/auth/logout", post(logout::<S>));

    let protected_routes = Router::new()
        .route("/home", get(home))
        .route("/api/me", get(me));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // Outer layers run first: authentication binds the identity, then the
    // guard refuses protected paths that have none.
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity::<S>,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
