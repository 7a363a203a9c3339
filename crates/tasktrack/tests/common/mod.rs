//! Test utilities and common setup.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use tasktrack::api::{self, AppState};
use tasktrack::auth::{AuthConfig, AuthState, Role};
use tasktrack::db::Database;

pub const PASSWORD: &str = "Password123";

/// Create a test AuthConfig with a JWT secret for testing.
fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: Some("test-secret-for-integration-tests-minimum-32-chars".to_string()),
        ..AuthConfig::default()
    }
}

/// Router plus handles on its state for direct setup.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("jwt="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn set_cookie_header(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

/// Create a test application backed by an in-memory database.
pub async fn test_app() -> TestApp {
    let db = Database::in_memory().await.unwrap();
    let auth_state = AuthState::new(test_auth_config()).unwrap();
    let state = AppState::new(&db, auth_state);

    TestApp {
        router: api::create_router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn register(&self, email: &str, username: &str) -> TestResponse {
        self.post(
            "/account/register",
            None,
            json!({
                "email": email,
                "firstName": "Test",
                "lastName": "User",
                "userName": username,
                "password": PASSWORD
            }),
        )
        .await
    }

    pub async fn login(&self, identifier: &str, password: &str) -> TestResponse {
        self.post(
            "/account/login",
            None,
            json!({ "userNameOrEmail": identifier, "password": password }),
        )
        .await
    }

    /// Register, log in and return the `jwt=...` cookie.
    pub async fn signed_in(&self, email: &str, username: &str) -> String {
        assert_eq!(self.register(email, username).await.status, StatusCode::OK);
        self.login(username, PASSWORD)
            .await
            .session_cookie()
            .expect("login sets the session cookie")
    }

    /// Register an admin (promoted directly in the store) and return its cookie.
    pub async fn signed_in_admin(&self, email: &str, username: &str) -> String {
        assert_eq!(self.register(email, username).await.status, StatusCode::OK);
        self.state.users.set_role(username, Role::Admin).await.unwrap();
        self.login(username, PASSWORD)
            .await
            .session_cookie()
            .expect("login sets the session cookie")
    }

    /// Create a task and return its id.
    pub async fn create_task(&self, cookie: &str, name: &str, status: &str) -> i64 {
        let resp = self
            .post(
                "/task/create",
                Some(cookie),
                json!({
                    "task_Name": name,
                    "task_Description": format!("{name} description"),
                    "task_Status": status,
                    "task_Priority": 1
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
        resp.body["task"]["taskID"].as_i64().unwrap()
    }
}
