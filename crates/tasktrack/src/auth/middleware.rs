//! Session middleware: cookie → verified token → request principal.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, header::COOKIE, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use log::{debug, info, warn};
use std::convert::Infallible;
use std::sync::Arc;

use super::{
    AuthConfig, AuthError, Claims, ConfigValidationError, Principal, RevocationList, Role,
    TokenCodec, TokenError,
};

fn token_from_cookie_header<'a>(cookie_header: &'a str, cookie_name: &str) -> Option<&'a str> {
    cookie_header.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        let value = value.trim();
        if name.trim() == cookie_name && !value.is_empty() {
            Some(value)
        } else {
            None
        }
    })
}

/// A freshly minted session token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
    pub expires_at: chrono::DateTime<Utc>,
}

/// Authentication state shared across handlers.
#[derive(Clone, Debug)]
pub struct AuthState {
    config: Arc<AuthConfig>,
    codec: TokenCodec,
    revocations: Arc<RevocationList>,
}

impl AuthState {
    /// Validate the config and build the signing keys.
    ///
    /// Resolves `env:VAR_NAME` syntax in `jwt_secret` once, at construction time.
    pub fn new(config: AuthConfig) -> Result<Self, ConfigValidationError> {
        let secret = config.validate()?;
        Ok(Self {
            codec: TokenCodec::new(&secret),
            config: Arc::new(config),
            revocations: Arc::new(RevocationList::new()),
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.config.allowed_origins
    }

    /// Mint a signed token for `user_id`.
    pub fn issue_token(&self, user_id: i64, role: Role) -> Result<IssuedToken, AuthError> {
        let now = Utc::now().timestamp();
        let ttl = self.config.token_ttl_secs;
        let expires_at = now
            .checked_add(ttl)
            .and_then(|exp| chrono::DateTime::from_timestamp(exp, 0))
            .ok_or_else(|| {
                AuthError::Internal(format!("token expiry out of range (ttl {ttl}s)"))
            })?;
        let claims = Claims::new(user_id, role, now, ttl);
        let token = self.codec.encode(&claims)?;

        Ok(IssuedToken {
            token,
            claims,
            expires_at,
        })
    }

    /// Verify a token and turn it into a principal, honouring revocations.
    pub fn resolve_session(&self, token: &str) -> Result<Principal, TokenError> {
        let claims = self.codec.decode(token)?;
        if self.revocations.is_revoked(&claims.jti) {
            return Err(TokenError::Revoked);
        }
        Ok(Principal::from(claims))
    }

    /// Revoke the principal's token until it expires.
    pub fn revoke(&self, principal: &Principal) {
        self.revocations.revoke(
            &principal.token_id,
            principal.expires_at,
            Utc::now().timestamp(),
        );
    }

    /// `Set-Cookie` value carrying a session token.
    pub fn session_cookie(&self, issued: &IssuedToken) -> String {
        format!(
            "{}={}; Path=/; HttpOnly;{} SameSite=Strict; Max-Age={}",
            self.config.cookie_name,
            issued.token,
            self.secure_attr(),
            self.config.token_ttl_secs
        )
    }

    /// `Set-Cookie` value that removes the session cookie.
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly;{} SameSite=Strict; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
            self.config.cookie_name,
            self.secure_attr()
        )
    }

    fn secure_attr(&self) -> &'static str {
        if self.config.cookie_secure {
            " Secure;"
        } else {
            ""
        }
    }
}

/// Outcome of session resolution for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Session {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(principal) => Some(principal),
        }
    }
}

/// Routes mounted outside the middleware see an anonymous session.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Session>().cloned().unwrap_or_default())
    }
}

/// Session middleware.
///
/// Reads the session cookie and injects a [`Session`] into request extensions.
/// A missing, expired, tampered or revoked token leaves the request anonymous;
/// it never aborts the request.
pub async fn session_middleware(
    State(auth): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(|cookie_header| token_from_cookie_header(cookie_header, auth.cookie_name()))
        .map(str::to_owned);

    let session = match token {
        None => Session::Anonymous,
        Some(token) => match auth.resolve_session(&token) {
            Ok(principal) => Session::Authenticated(principal),
            Err(TokenError::Expired) => {
                debug!("Session token expired; continuing anonymously");
                Session::Anonymous
            }
            Err(TokenError::Revoked) => {
                info!("Revoked session token presented; continuing anonymously");
                Session::Anonymous
            }
            Err(TokenError::BadSignature) => {
                warn!("Session token signature mismatch (tampered or foreign key)");
                Session::Anonymous
            }
            Err(TokenError::Malformed(reason)) => {
                warn!("Malformed session token: {}", reason);
                Session::Anonymous
            }
        },
    };

    req.extensions_mut().insert(session);
    next.run(req).await
}
