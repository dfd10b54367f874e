pub mod errors;
pub mod models;
pub mod ports;
pub mod verifier;

pub use errors::CredentialError;
pub use errors::StoreError;
pub use errors::UsernameError;
pub use models::Credential;
pub use models::Username;
pub use ports::CredentialStore;
pub use verifier::CredentialVerifier;
