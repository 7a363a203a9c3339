//! Task handlers. Every route acts on the caller's own tasks.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::CurrentUser;
use crate::task::{CreateTaskRequest, Task};

/// Confirmation plus the task as stored.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub message: String,
    pub task: Task,
}

/// Create a task owned by the caller.
#[instrument(skip(state, user, payload), fields(user_id = user.id()))]
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let Json(request) = payload?;
    let task = state.tasks.create(user.id(), request).await?;
    Ok(Json(TaskResponse {
        message: "Task Created Successfully".to_string(),
        task,
    }))
}

/// Partially update one of the caller's tasks.
#[instrument(skip(state, user, payload), fields(user_id = user.id()))]
pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    task_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let Path(task_id) = task_id?;
    let Json(body) = payload?;
    let Value::Object(fields) = body else {
        return Err(ApiError::bad_request("Request body must be a JSON object."));
    };

    let task = state.tasks.update(user.id(), task_id, &fields).await?;
    Ok(Json(TaskResponse {
        message: "Task updated successfully.".to_string(),
        task,
    }))
}

/// Soft-delete one of the caller's tasks.
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    task_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(task_id) = task_id?;
    state.tasks.delete(user.id(), task_id).await?;
    Ok(Json(MessageResponse::new("Task Deleted Successfully.")))
}

/// The caller's live tasks.
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.tasks.list_for_owner(user.id()).await?))
}

/// The caller's live tasks with one status. `InProgress` means "In Progress".
#[instrument(skip(state, user), fields(user_id = user.id()))]
pub async fn list_tasks_by_status(
    State(state): State<AppState>,
    user: CurrentUser,
    status: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    let Path(status) = status?;
    Ok(Json(state.tasks.list_by_status(user.id(), &status).await?))
}
