//! User data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Role;

/// User entity from database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Public user info (safe to return to clients). Never carries the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            user_name: user.username,
        }
    }
}

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub password: String,
}

/// Insert payload with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            email: "a@x.com".to_string(),
            username: "alice123".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            role: Role::User,
            created_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_user_info_wire_format() {
        let json = serde_json::to_value(UserInfo::from(sample_user())).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["firstName"], "Alice");
        assert_eq!(json["lastName"], "Liddell");
        assert_eq!(json["userName"], "alice123");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "a@x.com",
            "firstName": "Alice",
            "lastName": "Liddell",
            "userName": "alice123",
            "password": "Password123"
        }))
        .unwrap();
        assert_eq!(req.user_name, "alice123");
        assert_eq!(req.first_name, "Alice");
    }

    #[test]
    fn test_register_request_missing_fields_default_empty() {
        let req: RegisterRequest =
            serde_json::from_value(serde_json::json!({ "email": "a@x.com" })).unwrap();
        assert!(req.password.is_empty());
        assert!(req.user_name.is_empty());
    }
}
