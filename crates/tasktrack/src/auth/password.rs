//! Password hashing and verification (bcrypt).

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

// Use a lower cost factor for development speed
const HASH_COST: u32 = if cfg!(debug_assertions) { 4 } else { 10 };

/// Checked when no account matches, so an unknown identifier costs one bcrypt run too.
static DUMMY_VERIFIER: Lazy<String> =
    Lazy::new(|| hash_password("tasktrack-no-such-account").unwrap_or_default());

/// Hash a password with a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, HASH_COST).context("Failed to hash password")
}

/// Verifier at the regular cost that matches no real password.
pub fn dummy_verifier() -> &'static str {
    &DUMMY_VERIFIER
}

/// Verify a password against a stored verifier.
///
/// A malformed verifier is treated as a mismatch.
pub fn verify_password(password: &str, verifier: &str) -> bool {
    bcrypt::verify(password, verifier).unwrap_or(false)
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("password hashing task panicked")?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: String, verifier: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &verifier))
        .await
        .unwrap_or(false)
}
