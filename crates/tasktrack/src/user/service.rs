//! User service: registration rules and account lookups.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{info, instrument};

use super::models::{FieldError, NewUser, RegisterRequest, User};
use super::repository::{UserRepository, is_unique_violation};
use crate::auth::{Role, hash_password_blocking};

const MAX_NAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 100;
const MAX_USERNAME_LEN: usize = 20;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 20;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Failures of user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("registration data is invalid")]
    Validation(Vec<FieldError>),

    #[error("please enter a unique email or username")]
    DuplicateIdentity,

    #[error("user not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Check a registration form against the account rules.
///
/// Returns every failed rule, not just the first.
pub fn validate_registration(req: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_required_max(&mut errors, "firstName", "First name", &req.first_name, MAX_NAME_LEN);
    check_required_max(&mut errors, "lastName", "Last name", &req.last_name, MAX_NAME_LEN);

    if check_required_max(&mut errors, "email", "Email", &req.email, MAX_EMAIL_LEN)
        && !EMAIL_RE.is_match(&req.email)
    {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    check_required_max(
        &mut errors,
        "userName",
        "Username",
        &req.user_name,
        MAX_USERNAME_LEN,
    );

    let password_len = req.password.chars().count();
    if password_len == 0 {
        errors.push(FieldError::new("password", "Password is required"));
    } else if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password_len) {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
            ),
        ));
    }

    errors
}

/// Returns true when the value is present and within bounds.
fn check_required_max(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
        return false;
    }
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{label} cannot exceed {max} characters"),
        ));
        return false;
    }
    true
}

/// Service for user management operations.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Register a new account with the `user` role.
    #[instrument(skip(self, request), fields(username = %request.user_name))]
    pub async fn register(&self, request: RegisterRequest) -> Result<User, UserError> {
        let errors = validate_registration(&request);
        if !errors.is_empty() {
            return Err(UserError::Validation(errors));
        }

        let password_hash = hash_password_blocking(request.password).await?;
        let new_user = NewUser {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            username: request.user_name,
            password_hash,
            role: Role::User,
        };

        let user = match self.repo.create(new_user).await {
            Ok(user) => user,
            Err(err) if is_unique_violation(&err) => return Err(UserError::DuplicateIdentity),
            Err(err) => return Err(err.into()),
        };
        info!(user_id = user.id, username = %user.username, "Registered new user");

        Ok(user)
    }

    /// Get a user by ID.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i64) -> Result<User, UserError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// List all users.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.repo.list().await?)
    }

    /// Change the role of the user with this email or username.
    #[instrument(skip(self))]
    pub async fn set_role(&self, identifier: &str, role: Role) -> Result<User, UserError> {
        let user = self
            .repo
            .get_by_identifier(identifier)
            .await?
            .ok_or_else(|| UserError::NotFound(identifier.to_string()))?;

        self.repo.set_role(user.id, role).await?;
        info!(user_id = user.id, %role, "Changed user role");

        self.get_user(user.id).await
    }
}
