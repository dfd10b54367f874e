use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::TokenError;
use super::secret::SigningSecret;

const EXPECTED_ALGORITHM: &str = "HS256";

/// Only the field needed to screen the declared algorithm.
#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

/// Verifies token structure, algorithm, signature and expiry.
///
/// Validation is pure and reentrant; one instance is shared by every request.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator for tokens signed with `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked here in milliseconds, after the signature.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Not three base64url segments, undecodable JSON, or bad claims
    /// * `UnsupportedAlgorithm` - Header declares anything other than HS256
    /// * `BadSignature` - MAC does not match header and payload
    /// * `Expired` - Signature is valid but `exp` has passed
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now().timestamp_millis())
    }

    /// Validate a token as if the current time were `now_millis`.
    pub fn validate_at(&self, token: &str, now_millis: i64) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::Malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        }

        // Screen the algorithm before any key material is touched.
        let algorithm = declared_algorithm(segments[0])?;
        if algorithm != EXPECTED_ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(algorithm));
        }

        if segments[1].is_empty() || segments[2].is_empty() {
            return Err(TokenError::Malformed("empty segment".to_string()));
        }

        // HMAC comparison inside jsonwebtoken is constant-time.
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims;

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".to_string()));
        }
        if claims.exp <= claims.iat {
            return Err(TokenError::Malformed(
                "expiration does not follow issue time".to_string(),
            ));
        }
        if claims.is_expired(now_millis) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

fn declared_algorithm(header_segment: &str) -> Result<String, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|e| TokenError::Malformed(format!("header is not base64url: {}", e)))?;
    let header: DeclaredHeader = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("header is not valid JSON: {}", e)))?;
    Ok(header.alg)
}

fn classify(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::UnsupportedAlgorithm(error.to_string())
        }
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(error.to_string()),
    }
}
