use std::sync::Arc;

use super::errors::CredentialError;
use super::models::Username;
use super::ports::CredentialStore;
use crate::identity::Identity;
use crate::password::HashedPassword;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Checks a username and raw password against the credential store.
///
/// Every failed attempt costs one password verification, whether or not the
/// user exists, so response time does not reveal which usernames are taken.
pub struct CredentialVerifier<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    dummy_hash: HashedPassword,
}

impl<S> CredentialVerifier<S>
where
    S: CredentialStore,
{
    /// Create a new verifier over `store`.
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash used for unknown users could not be built
    pub fn new(store: Arc<S>, password_hasher: PasswordHasher) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash("decoy-password-for-unknown-users")?;
        Ok(Self {
            store,
            password_hasher,
            dummy_hash,
        })
    }

    /// Verify `password` for `username`.
    ///
    /// Performs at most one store read and never retries. A username that
    /// fails validation is never looked up.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user, invalid username, or wrong password
    /// * `Store` - The store lookup failed
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, CredentialError> {
        let credential = match Username::new(username.to_string()) {
            Ok(username) => self.store.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(credential) = credential else {
            // Burn the same work as a real check; the result is irrelevant.
            let _ = self.password_hasher.verify(password, &self.dummy_hash);
            tracing::info!("Login rejected: invalid credentials");
            return Err(CredentialError::InvalidCredentials);
        };

        match self
            .password_hasher
            .verify(password, &credential.password_hash)
        {
            Ok(true) => Ok(Identity::new(
                credential.username.as_str(),
                Some(credential.role),
            )),
            Ok(false) => {
                tracing::info!("Login rejected: invalid credentials");
                Err(CredentialError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(
                    username = %credential.username,
                    error = %e,
                    "Stored password hash could not be read"
                );
                Err(CredentialError::InvalidCredentials)
            }
        }
    }
}
