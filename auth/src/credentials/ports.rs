use async_trait::async_trait;

use super::errors::StoreError;
use super::models::Credential;
use super::models::Username;

/// Persistence capability for credentials.
///
/// The core only reads through `find_by_username`; `save` backs registration.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve a credential by username.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional credential (None if no such user)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store could not be reached
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Credential>, StoreError>;

    /// Persist a new credential.
    ///
    /// # Arguments
    /// * `credential` - Credential with an already hashed password
    ///
    /// # Returns
    /// Saved credential
    ///
    /// # Errors
    /// * `Conflict` - Username is already taken
    /// * `Unavailable` - Backing store could not be reached
    async fn save(&self, credential: Credential) -> Result<Credential, StoreError>;
}
