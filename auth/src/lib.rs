//! Authentication core library
//!
//! Stateless, token-based authentication for a network-facing application:
//! - Password hashing (Argon2id) and credential verification
//! - Signed token issuance and validation (HS256)
//! - Path exemption policy and per-request authentication
//!
//! Nothing here depends on an HTTP framework or a database. Services plug in a
//! [`CredentialStore`] and adapt [`RequestAuthenticator`] to their router.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Identity, SigningSecret, TokenIssuer, TokenValidator};
//!
//! let secret = SigningSecret::new(b"secret_key_at_least_32_bytes_long!".to_vec()).unwrap();
//! let issuer = TokenIssuer::with_default_ttl(&secret);
//! let validator = TokenValidator::new(&secret);
//!
//! let issued = issuer.issue(&Identity::new("alice", None)).unwrap();
//! let claims = validator.validate(issued.token.as_str()).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```
//!
//! ## Per-request Authentication
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AuthState, PathExemptionPolicy, RequestAuthenticator, SigningSecret, TokenValidator};
//!
//! let secret = SigningSecret::new(b"secret_key_at_least_32_bytes_long!".to_vec()).unwrap();
//! let authenticator = RequestAuthenticator::new(
//!     PathExemptionPolicy::default(),
//!     Arc::new(TokenValidator::new(&secret)),
//! );
//!
//! let context = authenticator.authenticate("/home", None);
//! assert_eq!(context.state(), &AuthState::NoToken);
//! assert!(context.identity().is_none());
//! ```

pub mod authenticator;
pub mod credentials;
pub mod exemption;
pub mod identity;
pub mod password;
pub mod request;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::LoginError;
pub use authenticator::RegistrationError;
pub use credentials::Credential;
pub use credentials::CredentialError;
pub use credentials::CredentialStore;
pub use credentials::CredentialVerifier;
pub use credentials::StoreError;
pub use credentials::Username;
pub use credentials::UsernameError;
pub use exemption::PathExemptionPolicy;
pub use identity::AuthenticatedIdentity;
pub use identity::Identity;
pub use password::HashedPassword;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use request::AuthContext;
pub use request::AuthState;
pub use request::RequestAuthenticator;
pub use token::AuthToken;
pub use token::Claims;
pub use token::IssuedToken;
pub use token::SecretError;
pub use token::SigningSecret;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenValidator;
