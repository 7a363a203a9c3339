//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Secrets that must never be accepted, whatever their length.
const KNOWN_INSECURE_SECRETS: &[&str] = &[
    "dev-secret-change-in-production",
    "8DpE3PAHFEhVg5uOCzpqIDrxTy18XD9eJ+++XVyrbXAzYAIEpNltoUjEA3f+5G9X",
];

const MIN_SECRET_LENGTH: usize = 32;

/// Longest accepted session lifetime (30 days).
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret. Supports `env:VAR_NAME` indirection.
    pub jwt_secret: Option<String>,

    /// Session token lifetime in seconds.
    pub token_ttl_secs: i64,

    /// Name of the cookie carrying the session token.
    pub cookie_name: String,

    /// Emit the `Secure` attribute on the session cookie.
    pub cookie_secure: bool,

    /// Allowed CORS origins. If empty, cross-origin requests are refused.
    pub allowed_origins: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_secs: 3600,
            cookie_name: "jwt".to_string(),
            cookie_secure: true,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl AuthConfig {
    /// Resolve the JWT secret, expanding `env:VAR_NAME` syntax.
    pub fn resolve_jwt_secret(&self) -> Result<Option<String>, ConfigValidationError> {
        match &self.jwt_secret {
            None => Ok(None),
            Some(value) => {
                if let Some(var_name) = value.strip_prefix("env:") {
                    match std::env::var(var_name) {
                        Ok(secret) if !secret.is_empty() => Ok(Some(secret)),
                        Ok(_) => Err(ConfigValidationError::EnvVarEmpty(var_name.to_string())),
                        Err(_) => Err(ConfigValidationError::EnvVarNotFound(var_name.to_string())),
                    }
                } else {
                    Ok(Some(value.clone()))
                }
            }
        }
    }

    /// Validate the configuration and return the resolved signing secret.
    pub fn validate(&self) -> Result<String, ConfigValidationError> {
        let secret = self
            .resolve_jwt_secret()?
            .ok_or(ConfigValidationError::MissingJwtSecret)?;

        if KNOWN_INSECURE_SECRETS.contains(&secret.as_str()) {
            return Err(ConfigValidationError::InsecureJwtSecret);
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigValidationError::JwtSecretTooShort);
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(ConfigValidationError::InvalidTokenTtl(self.token_ttl_secs));
        }
        if self.cookie_name.is_empty() {
            return Err(ConfigValidationError::EmptyCookieName);
        }

        Ok(secret)
    }

    /// Generate a random JWT secret from the OS-backed thread RNG.
    pub fn generate_jwt_secret() -> String {
        use rand::Rng;

        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        const SECRET_LENGTH: usize = 64;

        let mut rng = rand::rng();
        (0..SECRET_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    MissingJwtSecret,
    InsecureJwtSecret,
    JwtSecretTooShort,
    InvalidTokenTtl(i64),
    EmptyCookieName,
    /// Environment variable not found (for `env:VAR_NAME` syntax).
    EnvVarNotFound(String),
    /// Environment variable is empty (for `env:VAR_NAME` syntax).
    EnvVarEmpty(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJwtSecret => write!(
                f,
                "JWT secret is required. Set TASKTRACK__AUTH__JWT_SECRET or auth.jwt_secret in config."
            ),
            Self::InsecureJwtSecret => write!(
                f,
                "JWT secret is a publicly known value. Please configure a fresh secret."
            ),
            Self::JwtSecretTooShort => write!(
                f,
                "JWT secret must be at least {MIN_SECRET_LENGTH} characters long."
            ),
            Self::InvalidTokenTtl(ttl) => {
                write!(
                    f,
                    "auth.token_ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS} (got {ttl})."
                )
            }
            Self::EmptyCookieName => write!(f, "auth.cookie_name must not be empty."),
            Self::EnvVarNotFound(var) => write!(
                f,
                "Environment variable '{var}' not found (referenced via env:{var} in config)."
            ),
            Self::EnvVarEmpty(var) => write!(
                f,
                "Environment variable '{var}' is empty (referenced via env:{var} in config)."
            ),
        }
    }
}

impl std::error::Error for ConfigValidationError {}
