use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::extractors::CurrentIdentity;

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            subject: identity.subject().to_string(),
            roles: identity.roles().to_vec(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub subject: String,
    pub roles: Vec<String>,
}
