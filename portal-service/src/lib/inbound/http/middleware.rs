use auth::AuthContext;
use auth::CredentialStore;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that establishes the request's identity.
///
/// Always continues the pipeline. The resulting [`AuthContext`] is stored in
/// the request extensions for the guard and handlers to read.
pub async fn authenticate<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response
where
    S: CredentialStore,
{
    let token = extract_token(&jar, req.headers(), &state.cookie.name);
    let context = state
        .request_authenticator
        .authenticate(req.uri().path(), token.as_deref());

    tracing::debug!(
        path = %req.uri().path(),
        state = ?context.state(),
        "Request authentication resolved"
    );

    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Authorization guard: protected paths require a bound identity.
pub async fn require_identity<S>(
    State(state): State<AppState<S>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    S: CredentialStore,
{
    let path = req.uri().path();
    if state.request_authenticator.policy().is_exempt(path) {
        return Ok(next.run(req).await);
    }

    let authenticated = req
        .extensions()
        .get::<AuthContext>()
        .is_some_and(AuthContext::is_authenticated);

    if !authenticated {
        tracing::debug!(path = %path, "Protected path requested without identity");
        return Err(ApiError::unauthenticated());
    }

    Ok(next.run(req).await)
}

/// Cookie first, then `Authorization: Bearer`. Empty values count as absent.
fn extract_token(jar: &CookieJar, headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
