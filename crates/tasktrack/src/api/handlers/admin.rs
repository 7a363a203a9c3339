//! Admin-only handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use tracing::{info, instrument, warn};

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::RequireAdmin;
use crate::task::{Task, TaskError};
use crate::user::UserInfo;

/// List every registered user.
#[instrument(skip(state, admin))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> ApiResult<Json<Vec<UserInfo>>> {
    let users: Vec<UserInfo> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(UserInfo::from)
        .collect();

    info!(admin_id = admin.id(), count = users.len(), "Admin listed users");
    Ok(Json(users))
}

/// All tasks of one user, soft-deleted ones included.
#[instrument(skip(state, admin))]
pub async fn user_tasks(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    let Path(user_id) = user_id?;
    let tasks = match state.tasks.list_for_admin(user_id).await {
        Ok(tasks) => tasks,
        Err(err @ TaskError::UserNotFound(_)) => {
            warn!(admin_id = admin.id(), user_id, "Admin requested tasks of unknown user");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    info!(
        admin_id = admin.id(),
        user_id,
        count = tasks.len(),
        "Admin listed user tasks"
    );
    Ok(Json(tasks))
}
