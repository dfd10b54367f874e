use std::sync::Arc;

use crate::credentials::models::DEFAULT_ROLE;
use crate::credentials::Credential;
use crate::credentials::CredentialError;
use crate::credentials::CredentialStore;
use crate::credentials::CredentialVerifier;
use crate::credentials::StoreError;
use crate::credentials::Username;
use crate::credentials::UsernameError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::IssuedToken;
use crate::token::TokenError;
use crate::token::TokenIssuer;

/// Authentication coordinator combining credential verification and token issuance.
///
/// Login runs `CredentialVerifier` then `TokenIssuer`; registration hashes
/// the password and saves the credential.
pub struct Authenticator<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    verifier: CredentialVerifier<S>,
    issuer: TokenIssuer,
}

/// Login operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store error: {0}")]
    Store(StoreError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl From<CredentialError> for LoginError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials => LoginError::InvalidCredentials,
            CredentialError::Store(e) => LoginError::Store(e),
        }
    }
}

/// Registration operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistrationError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Password too short: minimum {min} characters, got {actual}")]
    WeakPassword { min: usize, actual: usize },

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

impl<S> Authenticator<S>
where
    S: CredentialStore,
{
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `issuer` - Token issuer holding the signing secret
    ///
    /// # Errors
    /// * `PasswordError` - Verifier setup failed
    pub fn new(store: Arc<S>, issuer: TokenIssuer) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::new();
        let verifier = CredentialVerifier::new(Arc::clone(&store), password_hasher.clone())?;

        Ok(Self {
            store,
            password_hasher,
            verifier,
            issuer,
        })
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Store` - Credential lookup failed
    /// * `Token` - Token generation failed
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, LoginError> {
        let identity = self.verifier.authenticate(username, password).await?;
        let issued = self.issuer.issue(&identity)?;

        tracing::info!(
            username = %identity.subject,
            expires_at = issued.claims.exp,
            "Token issued"
        );

        Ok(issued)
    }

    /// Hash a password and store a new credential.
    ///
    /// # Arguments
    /// * `username` - Raw username, validated here
    /// * `password` - Plaintext password
    /// * `role` - Role to grant, `USER` when absent
    ///
    /// # Errors
    /// * `InvalidUsername` - Username fails validation
    /// * `WeakPassword` - Password shorter than 8 characters
    /// * `Store` - Username taken or store unavailable
    pub async fn register(
        &self,
        username: String,
        password: &str,
        role: Option<String>,
    ) -> Result<Credential, RegistrationError> {
        let username = Username::new(username)?;

        let length = password.chars().count();
        if length < Self::MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::WeakPassword {
                min: Self::MIN_PASSWORD_LENGTH,
                actual: length,
            });
        }

        let credential = Credential {
            username,
            password_hash: self.password_hasher.hash(password)?,
            role: role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        };

        let saved = self.store.save(credential).await?;
        tracing::info!(username = %saved.username, role = %saved.role, "Credential registered");

        Ok(saved)
    }
}
