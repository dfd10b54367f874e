use auth::CredentialStore;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Verify credentials, set the token cookie and echo the token.
///
/// Every failure to authenticate is the same 401 "Invalid credentials".
pub async fn login<S>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError>
where
    S: CredentialStore,
{
    let issued = state
        .authenticator
        .login(&body.username, &body.password)
        .await?;

    let ttl = state.authenticator.issuer().ttl();
    let cookie = state
        .cookie
        .token_cookie(issued.token.as_str().to_string(), ttl);

    Ok((
        jar.add(cookie),
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                username: issued.claims.sub.clone(),
                expires_at: issued.claims.expires_at(),
                token: issued.token.into_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub username: String,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}
