use crate::token::Claims;

/// Principal proven by a password check, ready to be turned into a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
    pub role: Option<String>,
}

impl Identity {
    pub fn new(subject: impl Into<String>, role: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }
}

/// Principal established for a single request from a validated token.
///
/// Constructed only from validated [`Claims`] and never shared across
/// requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    subject: String,
    roles: Vec<String>,
}

impl AuthenticatedIdentity {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl From<Claims> for AuthenticatedIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            roles: claims.role.into_iter().collect(),
        }
    }
}
