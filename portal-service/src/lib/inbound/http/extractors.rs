use auth::AuthContext;
use auth::AuthenticatedIdentity;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::handlers::ApiError;

/// Identity bound by the authentication middleware. Rejects with 401 when absent.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub AuthenticatedIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bound_identity(parts)
            .map(CurrentIdentity)
            .ok_or_else(ApiError::unauthenticated)
    }
}

/// Identity if one happened to validate; never rejects.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<AuthenticatedIdentity>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(bound_identity(parts)))
    }
}

fn bound_identity(parts: &Parts) -> Option<AuthenticatedIdentity> {
    parts
        .extensions
        .get::<AuthContext>()
        .and_then(AuthContext::identity)
        .cloned()
}
