use std::collections::HashMap;

use async_trait::async_trait;
use auth::Credential;
use auth::CredentialStore;
use auth::StoreError;
use auth::Username;
use tokio::sync::RwLock;

/// Process-local credential store for development and tests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, StoreError> {
        Ok(self
            .credentials
            .read()
            .await
            .get(username.as_str())
            .cloned())
    }

    async fn save(&self, credential: Credential) -> Result<Credential, StoreError> {
        let mut credentials = self.credentials.write().await;
        let key = credential.username.as_str().to_string();
        if credentials.contains_key(&key) {
            return Err(StoreError::Conflict(key));
        }
        credentials.insert(key, credential.clone());
        Ok(credential)
    }
}
