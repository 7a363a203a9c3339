//! Credential check and token issuance.

use tracing::{info, instrument};

use super::{AuthError, AuthState, IssuedToken, dummy_verifier, verify_password_blocking};
use crate::user::{User, UserRepository};

/// Verifier to check the password against; unknown users get the dummy one.
fn stored_verifier(user: Option<&User>) -> String {
    user.map_or_else(
        || dummy_verifier().to_string(),
        |user| user.password_hash.clone(),
    )
}

/// Validates credentials against the user store and mints session tokens.
#[derive(Debug, Clone)]
pub struct Authenticator {
    users: UserRepository,
    auth: AuthState,
}

impl Authenticator {
    pub fn new(users: UserRepository, auth: AuthState) -> Self {
        // Hash the dummy verifier now rather than on the first unknown login.
        dummy_verifier();
        Self { users, auth }
    }

    /// Authenticate by email or username.
    ///
    /// Unknown identifiers and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`], and both run one bcrypt verification.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        let user = self
            .users
            .get_by_identifier(identifier)
            .await
            .map_err(|e| AuthError::Internal(format!("{e:#}")))?;

        let matched =
            verify_password_blocking(password.to_string(), stored_verifier(user.as_ref())).await;
        let user = match user {
            Some(user) if matched => user,
            Some(user) => {
                info!(user_id = user.id, "Login rejected: wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                info!("Login rejected: unknown identifier");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let issued = self.auth.issue_token(user.id, user.role)?;
        info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(issued)
    }
}
