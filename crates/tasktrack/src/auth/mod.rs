//! Authentication and authorization.
//!
//! Login checks credentials and mints an HS256 session token carried in an
//! HTTP-only cookie. On every request [`session_middleware`] turns that cookie
//! back into a [`Principal`] (or an anonymous [`Session`]); handlers then apply
//! a [`Policy`] through the [`CurrentUser`] and [`RequireAdmin`] extractors.

mod authenticator;
mod claims;
mod codec;
mod config;
mod error;
mod guard;
mod middleware;
mod password;
mod revocation;

pub use authenticator::Authenticator;
pub use claims::{Claims, Principal, Role};
pub use codec::TokenCodec;
pub use config::{AuthConfig, ConfigValidationError};
pub use error::{AuthError, TokenError};
pub use guard::{CurrentUser, Policy, RequireAdmin};
pub use middleware::{AuthState, IssuedToken, Session, session_middleware};
pub use password::{
    dummy_verifier, hash_password, hash_password_blocking, verify_password,
    verify_password_blocking,
};
pub use revocation::RevocationList;
