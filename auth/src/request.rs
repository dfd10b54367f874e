use std::sync::Arc;

use chrono::Utc;

use crate::exemption::PathExemptionPolicy;
use crate::identity::AuthenticatedIdentity;
use crate::token::TokenError;
use crate::token::TokenValidator;

/// Where a request ended up in the authentication pipeline.
///
/// `TokenPresent` is the only intermediate state; every other state is
/// terminal and is what handlers observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Protected path, no token carrier on the request.
    NoToken,
    /// Token carrier found, not yet validated.
    TokenPresent,
    /// Token validated; an identity is bound to the request.
    Validated,
    /// Token failed validation; the request continues anonymously.
    Rejected(TokenError),
    /// Exempt path; identity is optional.
    Bypassed,
}

impl AuthState {
    fn initial(exempt: bool, has_token: bool) -> Self {
        match (exempt, has_token) {
            (true, _) => AuthState::Bypassed,
            (false, true) => AuthState::TokenPresent,
            (false, false) => AuthState::NoToken,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuthState::TokenPresent)
    }
}

/// Request-scoped authentication result.
///
/// Immutable once built; dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    state: AuthState,
    identity: Option<AuthenticatedIdentity>,
}

impl AuthContext {
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Establishes (or withholds) an identity for each inbound request.
///
/// Never fails a request: an invalid token leaves the request anonymous and
/// it is up to the authorization guard to refuse protected access.
pub struct RequestAuthenticator {
    policy: PathExemptionPolicy,
    validator: Arc<TokenValidator>,
}

impl RequestAuthenticator {
    pub fn new(policy: PathExemptionPolicy, validator: Arc<TokenValidator>) -> Self {
        Self { policy, validator }
    }

    pub fn policy(&self) -> &PathExemptionPolicy {
        &self.policy
    }

    /// Run the pipeline for one request.
    ///
    /// # Arguments
    /// * `path` - Request path, without query string
    /// * `token` - Token carrier value, if the request has one
    pub fn authenticate(&self, path: &str, token: Option<&str>) -> AuthContext {
        self.authenticate_at(path, token, Utc::now().timestamp_millis())
    }

    /// Run the pipeline as if the current time were `now_millis`.
    pub fn authenticate_at(
        &self,
        path: &str,
        token: Option<&str>,
        now_millis: i64,
    ) -> AuthContext {
        let token = token.filter(|t| !t.is_empty());
        let state = AuthState::initial(self.policy.is_exempt(path), token.is_some());

        let (state, identity) = match (state, token) {
            (AuthState::TokenPresent, Some(token)) => {
                match self.validator.validate_at(token, now_millis) {
                    Ok(claims) => (
                        AuthState::Validated,
                        Some(AuthenticatedIdentity::from(claims)),
                    ),
                    Err(error) => {
                        tracing::debug!(path, reason = error.kind(), "Token rejected");
                        (AuthState::Rejected(error), None)
                    }
                }
            }
            // Exempt paths may still carry a usable identity.
            (AuthState::Bypassed, Some(token)) => (
                AuthState::Bypassed,
                self.validator
                    .validate_at(token, now_millis)
                    .ok()
                    .map(AuthenticatedIdentity::from),
            ),
            (state, _) => (state, None),
        };

        debug_assert!(state.is_terminal());
        AuthContext { state, identity }
    }
}
