//! JWT token issuance and validation
//! HS256-signed session tokens with a fixed 24 hour lifetime

use crate::{
    auth::{claims::SessionClaims, error::AuthError},
    config::AppConfig,
    models::user::UserId,
};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;

/// The only signing scheme accepted on the way in
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token codec bound to one shared secret.
///
/// The secret is injected at construction and never changes afterwards, so a
/// single instance can be shared across request tasks behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec for `secret`.
    ///
    /// An empty secret is accepted here; configuration loading is where it
    /// gets refused.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // The validity window is checked by SessionClaims::check_window so
        // that [nbf, exp) is exact and testable with an explicit clock
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Create codec from config
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.security.jwt_secret.expose_secret())
    }

    /// Issue a token for the given principal, valid from now for 24 hours
    pub fn issue(&self, subject_id: UserId, subject_email: &str) -> Result<String, AuthError> {
        self.issue_at(subject_id, subject_email, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds)
    pub fn issue_at(
        &self,
        subject_id: UserId,
        subject_email: &str,
        now: i64,
    ) -> Result<String, AuthError> {
        let claims = SessionClaims::new(subject_id, subject_email, now);

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AuthError::IssuanceFailed(e.to_string())
        })
    }

    /// Validate a token against the current time
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token as if the current time were `now` (unix seconds)
    pub fn validate_at(&self, token: &str, now: i64) -> Result<SessionClaims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MalformedToken("empty token".to_string()));
        }

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                classify(e.kind())
            })?
            .claims;

        claims.check_window(now)?;

        Ok(claims)
    }
}

/// Map decoder failures onto the authentication taxonomy
fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature => AuthError::InvalidSignature("signature mismatch".to_string()),
        ErrorKind::InvalidAlgorithm => {
            AuthError::InvalidSignature("unexpected signing algorithm".to_string())
        }
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::ImmatureSignature => AuthError::NotYetValid,
        other => AuthError::MalformedToken(format!("{:?}", other)),
    }
}
