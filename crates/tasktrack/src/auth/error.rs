//! Authentication errors.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::ApiError;

/// Authentication and authorization failures visible to clients.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No valid session on the request.
    #[error("not authenticated")]
    Unauthenticated,

    /// Login failed. The message is the same for unknown users and wrong passwords.
    #[error("username/email or password is incorrect")]
    InvalidCredentials,

    /// Authenticated, but not allowed to call this endpoint.
    #[error("insufficient permissions: {0}")]
    Forbidden(String),

    /// Internal error.
    #[error("internal auth error: {0}")]
    Internal(String),
}

/// Session token decode failures.
///
/// Recovered inside the session middleware; never returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token revoked")]
    Revoked,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed(err.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
