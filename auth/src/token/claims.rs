use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried in the token payload.
///
/// `iat` and `exp` are Unix timestamps in milliseconds so that sub-second
/// lifetimes can be expressed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix milliseconds)
    pub iat: i64,

    /// Expiration time (Unix milliseconds)
    pub exp: i64,

    /// Single role granted to the subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    /// Create claims for a subject, valid for `ttl` starting at `issued_at`.
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp_millis();
        Self {
            sub: subject.to_string(),
            iat,
            exp: iat.saturating_add(ttl.num_milliseconds()),
            role: None,
        }
    }

    /// Set role.
    pub fn with_role(mut self, role: Option<String>) -> Self {
        self.role = role;
        self
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.iat)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.exp)
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at exactly its expiration instant.
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis > self.exp
    }
}
