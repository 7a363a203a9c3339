//! Application state shared across handlers.

use crate::auth::{AuthState, Authenticator};
use crate::db::Database;
use crate::task::{TaskRepository, TaskService};
use crate::user::{UserRepository, UserService};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// User service.
    pub users: UserService,
    /// Task service.
    pub tasks: TaskService,
    /// Authentication state (keys, cookie settings, revocations).
    pub auth: AuthState,
    /// Credential check and token issuance.
    pub authenticator: Authenticator,
}

impl AppState {
    /// Wire services onto one database pool.
    pub fn new(db: &Database, auth: AuthState) -> Self {
        let user_repo = UserRepository::new(db.pool().clone());
        let task_repo = TaskRepository::new(db.pool().clone());

        Self {
            users: UserService::new(user_repo.clone()),
            tasks: TaskService::new(task_repo, user_repo.clone()),
            authenticator: Authenticator::new(user_repo, auth.clone()),
            auth,
        }
    }
}
