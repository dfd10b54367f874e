use auth::Credential;
use auth::CredentialStore;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn register<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError>
where
    S: CredentialStore,
{
    // Self-registration never picks its own role.
    state
        .authenticator
        .register(body.username, &body.password, None)
        .await
        .map_err(ApiError::from)
        .map(|ref credential| ApiSuccess::new(StatusCode::CREATED, credential.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub username: String,
    pub role: String,
}

impl From<&Credential> for RegisterResponseData {
    fn from(credential: &Credential) -> Self {
        Self {
            username: credential.username.as_str().to_string(),
            role: credential.role.clone(),
        }
    }
}
