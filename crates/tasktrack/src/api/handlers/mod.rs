//! API request handlers, organized by domain:
//! - `account`: registration, login, logout and the caller's profile
//! - `tasks`: the caller's own tasks
//! - `admin`: admin-only user and task views
//! - `misc`: health check

mod account;
mod admin;
mod misc;
mod tasks;

use serde::Serialize;

pub use account::{LoginRequest, login, logout, register, user_data};
pub use admin::{list_users, user_tasks};
pub use misc::{HealthResponse, health};
pub use tasks::{TaskResponse, create_task, delete_task, list_tasks, list_tasks_by_status, update_task};

/// Plain confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
