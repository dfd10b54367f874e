use auth::CredentialStore;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::extractors::MaybeIdentity;
use crate::inbound::http::router::AppState;

/// Overwrite the token cookie with an expired one.
///
/// Tokens stay valid until they expire; this only clears the browser copy.
pub async fn logout<S>(
    State(state): State<AppState<S>>,
    MaybeIdentity(identity): MaybeIdentity,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<LogoutResponseData>)
where
    S: CredentialStore,
{
    if let Some(identity) = &identity {
        tracing::info!(username = %identity.subject(), "Logged out");
    }

    (
        jar.add(state.cookie.cleared_cookie()),
        ApiSuccess::new(StatusCode::OK, LogoutResponseData { logged_out: true }),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub logged_out: bool,
}
