//! Task service: validation, ownership and soft delete.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, instrument};

use super::models::{CreateTaskRequest, NewTask, Task, TaskUpdate, parse_priority};
use super::repository::{TaskRepository, Visibility};
use crate::user::{FieldError, UserRepository};

/// Status path segment accepted as shorthand for "In Progress".
const IN_PROGRESS_ALIAS: &str = "InProgress";
const IN_PROGRESS: &str = "In Progress";

/// Failures of task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task data is invalid")]
    Validation(Vec<FieldError>),

    #[error("Invalid value for {0}.")]
    InvalidPriority(String),

    #[error("Task {0} not found.")]
    NotFound(i64),

    #[error("You do not have permission to modify this task.")]
    NotOwner,

    #[error("User with ID {0} not found.")]
    UserNotFound(i64),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Map a status path segment onto the stored status value.
pub fn normalize_status(status: &str) -> &str {
    if status == IN_PROGRESS_ALIAS {
        IN_PROGRESS
    } else {
        status
    }
}

fn validate_create(req: CreateTaskRequest) -> Result<NewTask, TaskError> {
    fn required(
        errors: &mut Vec<FieldError>,
        field: &'static str,
        value: Option<String>,
    ) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                errors.push(FieldError::new(field, format!("{field} is required")));
                String::new()
            }
        }
    }

    let mut errors = Vec::new();
    let name = required(&mut errors, "task_Name", req.name);
    let description = required(&mut errors, "task_Description", req.description);
    let status = required(&mut errors, "task_Status", req.status);
    let priority = match req.priority.as_ref() {
        None | Some(Value::Null) => {
            errors.push(FieldError::new("task_Priority", "task_Priority is required"));
            0
        }
        Some(value) => parse_priority(value).unwrap_or_else(|| {
            errors.push(FieldError::new(
                "task_Priority",
                "task_Priority must be an integer",
            ));
            0
        }),
    };

    if !errors.is_empty() {
        return Err(TaskError::Validation(errors));
    }

    Ok(NewTask {
        name,
        description,
        status,
        priority,
    })
}

/// Service for task operations.
#[derive(Debug, Clone)]
pub struct TaskService {
    repo: TaskRepository,
    users: UserRepository,
}

impl TaskService {
    pub fn new(repo: TaskRepository, users: UserRepository) -> Self {
        Self { repo, users }
    }

    /// Create a task owned by `owner_id`.
    #[instrument(skip(self, request))]
    pub async fn create(&self, owner_id: i64, request: CreateTaskRequest) -> Result<Task, TaskError> {
        let new_task = validate_create(request)?;
        let task = self.repo.create(owner_id, new_task).await?;
        info!(task_id = task.id, user_id = owner_id, "Created task");
        Ok(task)
    }

    /// Load a live task the caller owns.
    ///
    /// Existence is checked before ownership: missing or soft-deleted tasks
    /// are `NotFound`, other users' tasks are `NotOwner`.
    async fn owned_live_task(&self, caller_id: i64, task_id: i64) -> Result<Task, TaskError> {
        let task = self
            .repo
            .get(task_id)
            .await?
            .filter(|task| !task.is_deleted)
            .ok_or(TaskError::NotFound(task_id))?;

        if task.user_id != caller_id {
            return Err(TaskError::NotOwner);
        }
        Ok(task)
    }

    /// Apply a partial update from a loose JSON object.
    #[instrument(skip(self, fields))]
    pub async fn update(
        &self,
        caller_id: i64,
        task_id: i64,
        fields: &Map<String, Value>,
    ) -> Result<Task, TaskError> {
        self.owned_live_task(caller_id, task_id).await?;

        let update = TaskUpdate::from_fields(fields).map_err(TaskError::InvalidPriority)?;
        if !update.is_empty() {
            self.repo.update(task_id, &update).await?;
        }
        info!(task_id, user_id = caller_id, "Updated task");

        self.repo
            .get(task_id)
            .await?
            .ok_or(TaskError::NotFound(task_id))
    }

    /// Soft-delete a task the caller owns.
    #[instrument(skip(self))]
    pub async fn delete(&self, caller_id: i64, task_id: i64) -> Result<(), TaskError> {
        self.owned_live_task(caller_id, task_id).await?;
        self.repo.soft_delete(task_id).await?;
        info!(task_id, user_id = caller_id, "Deleted task");
        Ok(())
    }

    /// The caller's live tasks.
    #[instrument(skip(self))]
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Task>, TaskError> {
        Ok(self
            .repo
            .list_for_user(owner_id, None, Visibility::Live)
            .await?)
    }

    /// The caller's live tasks with the given status (exact match after aliasing).
    #[instrument(skip(self))]
    pub async fn list_by_status(&self, owner_id: i64, status: &str) -> Result<Vec<Task>, TaskError> {
        Ok(self
            .repo
            .list_for_user(owner_id, Some(normalize_status(status)), Visibility::Live)
            .await?)
    }

    /// Every task of `user_id`, soft-deleted ones included.
    #[instrument(skip(self))]
    pub async fn list_for_admin(&self, user_id: i64) -> Result<Vec<Task>, TaskError> {
        if !self.users.exists(user_id).await? {
            return Err(TaskError::UserNotFound(user_id));
        }
        Ok(self
            .repo
            .list_for_user(user_id, None, Visibility::All)
            .await?)
    }
}
