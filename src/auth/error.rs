//! Authentication failure taxonomy
//!
//! Variants stay distinct for logs and metrics. Callers only ever see
//! `public_message()`, which does not tell an expired token from a forged one.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No Authorization header, or nothing after the `Bearer ` prefix
    #[error("missing credential")]
    MissingCredential,

    /// Header present but not using the `Bearer ` scheme
    #[error("malformed authorization header")]
    MalformedHeader,

    /// Token does not parse into a header.payload.signature JWS
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// MAC mismatch, or the header declares an algorithm other than HS256
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("token expired")]
    Expired,

    #[error("token not yet valid")]
    NotYetValid,

    #[error("token issuance failed: {0}")]
    IssuanceFailed(String),
}

impl AuthError {
    /// Message safe to return to clients
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "Authorization header required",
            AuthError::MalformedHeader => "Invalid authorization header format",
            AuthError::MalformedToken(_)
            | AuthError::InvalidSignature(_)
            | AuthError::Expired
            | AuthError::NotYetValid => "Invalid token",
            AuthError::IssuanceFailed(_) => "Internal server error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::IssuanceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Low-cardinality label for the rejection counter
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing",
            AuthError::MalformedHeader | AuthError::MalformedToken(_) => "malformed",
            AuthError::InvalidSignature(_) => "invalid_signature",
            AuthError::Expired => "expired",
            AuthError::NotYetValid => "not_yet_valid",
            AuthError::IssuanceFailed(_) => "issuance_failed",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Token issuance failed");
        } else {
            tracing::debug!(reason = self.reason(), error = %self, "Request not authenticated");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
