use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::extractors::CurrentIdentity;
use crate::inbound::http::extractors::MaybeIdentity;

/// Public landing endpoint. Reports whether the caller is signed in.
pub async fn root(MaybeIdentity(identity): MaybeIdentity) -> ApiSuccess<RootResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        RootResponseData {
            message: "ok".to_string(),
            authenticated: identity.is_some(),
        },
    )
}

pub async fn home(CurrentIdentity(identity): CurrentIdentity) -> ApiSuccess<HomeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HomeResponseData {
            greeting: "Hello, ".to_string(),
            name: identity.subject().to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResponseData {
    pub message: String,
    pub authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeResponseData {
    pub greeting: String,
    pub name: String,
}
