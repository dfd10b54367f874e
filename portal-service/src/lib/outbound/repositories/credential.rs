use async_trait::async_trait;
use auth::Credential;
use auth::CredentialStore;
use auth::HashedPassword;
use auth::StoreError;
use auth::Username;
use sqlx::PgPool;

const UNIQUE_USERNAME_CONSTRAINT: &str = "credentials_pkey";

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query to prove the database is reachable.
    pub async fn check_connection(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Credential>, StoreError> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT username, password_hash, role
            FROM credentials
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        match row {
            Some((username, password_hash, role)) => Ok(Some(Credential {
                username: Username::new(username).map_err(|e| {
                    StoreError::Unavailable(format!("corrupt username row: {}", e))
                })?,
                password_hash: HashedPassword::from_phc(password_hash),
                role,
            })),
            None => Ok(None),
        }
    }

    async fn save(&self, credential: Credential) -> Result<Credential, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (username, password_hash, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(credential.username.as_str())
        .bind(credential.password_hash.as_str())
        .bind(credential.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(UNIQUE_USERNAME_CONSTRAINT)
                {
                    return StoreError::Conflict(credential.username.as_str().to_string());
                }
            }
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(credential)
    }
}
