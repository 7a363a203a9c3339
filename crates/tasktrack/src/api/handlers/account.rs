//! Account handlers: register, login, logout, profile.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::{CurrentUser, Session};
use crate::user::{FieldError, RegisterRequest, UserInfo};

/// Login form.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub user_name_or_email: String,
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.user_name_or_email.trim().is_empty() {
            errors.push(FieldError::new(
                "userNameOrEmail",
                "Username or email is required",
            ));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        errors
    }
}

/// Register a new account.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(request) = payload?;
    let user = state.users.register(request).await?;
    info!(user_id = user.id, "Account registered");

    Ok(Json(MessageResponse::new(format!(
        "{} {} registered successfully. Please log in.",
        user.first_name, user.last_name
    ))))
}

/// Log in with username or email and receive the session cookie.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let errors = request.validate();
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let issued = state
        .authenticator
        .authenticate(&request.user_name_or_email, &request.password)
        .await?;
    let cookie = state.auth.session_cookie(&issued);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// Log out: revoke the presented token (if any) and clear the cookie.
///
/// Always succeeds, with or without a session.
pub async fn logout(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    if let Some(principal) = session.principal() {
        state.auth.revoke(principal);
        info!(user_id = principal.user_id, "User logged out");
    }

    (
        AppendHeaders([(SET_COOKIE, state.auth.clear_cookie())]),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// Profile of the calling user.
#[instrument(skip(state, user))]
pub async fn user_data(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<UserInfo>> {
    let user = state.users.get_user(user.id()).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_names() {
        let req: LoginRequest = serde_json::from_value(serde_json::json!({
            "userNameOrEmail": "alice123",
            "password": "Password123"
        }))
        .unwrap();
        assert_eq!(req.user_name_or_email, "alice123");
        assert!(req.validate().is_empty());
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let fields: Vec<_> = LoginRequest::default()
            .validate()
            .iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["userNameOrEmail", "password"]);
    }
}
