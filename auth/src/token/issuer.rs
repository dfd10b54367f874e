use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;
use super::secret::SigningSecret;
use crate::identity::Identity;

/// Compact signed token, `header.payload.signature` in base64url.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// Token together with the claims it was built from.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: AuthToken,
    pub claims: Claims,
}

/// Builds and signs tokens for verified identities.
///
/// Uses HS256 (HMAC with SHA-256). Issuing is pure computation and creates no
/// server-side record.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer.
    ///
    /// # Arguments
    /// * `secret` - Signing secret shared with the validator
    /// * `ttl` - Lifetime of every issued token
    pub fn new(secret: &SigningSecret, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Create an issuer with the default one hour lifetime.
    pub fn with_default_ttl(secret: &SigningSecret) -> Self {
        Self::new(secret, Self::default_ttl())
    }

    pub fn default_ttl() -> Duration {
        Duration::hours(1)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Empty subject, non-positive TTL, or signing failed
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        if identity.subject.is_empty() {
            return Err(TokenError::EncodingFailed("empty subject".to_string()));
        }

        let claims = Claims::new(&identity.subject, now, self.ttl).with_role(identity.role.clone());
        if claims.exp <= claims.iat {
            return Err(TokenError::EncodingFailed(format!(
                "token lifetime must be positive, got {}ms",
                self.ttl.num_milliseconds()
            )));
        }

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            token: AuthToken(token),
            claims,
        })
    }
}
