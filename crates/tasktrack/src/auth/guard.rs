//! Per-endpoint authorization policies and their extractors.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Principal, Role, Session};

/// Who may call an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Any authenticated principal.
    Authenticated,
    /// Principals carrying the given role.
    Role(Role),
}

impl Policy {
    /// Admin-only shorthand.
    pub const ADMIN: Policy = Policy::Role(Role::Admin);

    /// Evaluate against a resolved session.
    ///
    /// No principal is always `Unauthenticated` (401); a principal lacking the
    /// required role is `Forbidden` (403).
    pub fn evaluate<'a>(&self, session: &'a Session) -> Result<&'a Principal, AuthError> {
        let principal = session.principal().ok_or(AuthError::Unauthenticated)?;
        match self {
            Policy::Authenticated => Ok(principal),
            Policy::Role(role) if principal.role == *role => Ok(principal),
            Policy::Role(role) => Err(AuthError::Forbidden(format!("{role} role required"))),
        }
    }
}

fn session_from_parts(parts: &Parts) -> Session {
    parts.extensions.get::<Session>().cloned().unwrap_or_default()
}

/// Authenticated user extracted from request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub principal: Principal,
}

impl CurrentUser {
    /// Get the user ID.
    pub fn id(&self) -> i64 {
        self.principal.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.principal.is_admin()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts);
        let principal = Policy::Authenticated.evaluate(&session)?.clone();
        Ok(CurrentUser { principal })
    }
}

/// Require admin role.
///
/// Use as an extractor in handlers that require admin access.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts);
        let principal = Policy::ADMIN.evaluate(&session)?.clone();
        Ok(RequireAdmin(CurrentUser { principal }))
    }
}
