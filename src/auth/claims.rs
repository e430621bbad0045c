//! Session claims carried inside issued tokens

use crate::{auth::error::AuthError, models::user::UserId};
use axum::extract::FromRequestParts;
use serde::{Deserialize, Serialize};

/// Lifetime of every issued token (24 hours)
pub const TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Identity and validity window asserted by a token.
///
/// Field names on the wire follow the registered JWT claim names
/// (`exp`, `iat`, `nbf`) plus `user_id` and `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Authenticated principal. Zero is a legal id.
    #[serde(rename = "user_id")]
    pub subject_id: UserId,

    /// Informational only, never used for authorization
    #[serde(rename = "email")]
    pub subject_email: String,

    /// Expiration (unix seconds, exclusive)
    #[serde(rename = "exp")]
    pub expires_at: i64,

    /// Issued at (unix seconds)
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Not before (unix seconds, inclusive)
    #[serde(rename = "nbf")]
    pub not_before: i64,
}

impl SessionClaims {
    /// Build claims for a token issued at `now`
    pub fn new(subject_id: UserId, subject_email: &str, now: i64) -> Self {
        Self {
            subject_id,
            subject_email: subject_email.to_string(),
            expires_at: now + TOKEN_LIFETIME_SECS,
            issued_at: now,
            not_before: now,
        }
    }

    /// Check `now` against `[not_before, expires_at)`
    pub fn check_window(&self, now: i64) -> Result<(), AuthError> {
        if now < self.not_before {
            return Err(AuthError::NotYetValid);
        }
        if now >= self.expires_at {
            return Err(AuthError::Expired);
        }
        Ok(())
    }
}

/// Verified identity attached to a request by the authentication gate.
///
/// Handlers on protected routes take it as an extractor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub subject_id: UserId,
    pub subject_email: String,
}

impl From<SessionClaims> for AuthenticatedIdentity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            subject_id: claims.subject_id,
            subject_email: claims.subject_email,
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Only present when the gate ran on this route
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or(AuthError::MissingCredential)
    }
}
