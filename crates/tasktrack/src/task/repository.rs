//! Task repository for database operations.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::models::{NewTask, Task, TaskUpdate};

const TASK_COLUMNS: &str =
    "id, user_id, name, description, status, priority, is_deleted, created_at, updated_at";

/// Which rows a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Live tasks only.
    Live,
    /// Live and soft-deleted tasks.
    All,
}

/// Repository for task database operations.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a task owned by `user_id`.
    #[instrument(skip(self, task))]
    pub async fn create(&self, user_id: i64, task: NewTask) -> Result<Task> {
        debug!("Creating task for user {}", user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (user_id, name, description, status, priority)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&task.name)
        .bind(&task.description)
        .bind(&task.status)
        .bind(task.priority)
        .execute(&self.pool)
        .await
        .context("Failed to insert task")?;

        self.get(result.last_insert_rowid())
            .await?
            .ok_or_else(|| anyhow::anyhow!("Task not found after creation"))
    }

    /// Get a task by ID, including soft-deleted ones.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch task")?;

        Ok(task)
    }

    /// List a user's tasks, optionally filtered by exact status.
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: i64,
        status: Option<&str>,
        visibility: Visibility,
    ) -> Result<Vec<Task>> {
        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?");
        if visibility == Visibility::Live {
            sql.push_str(" AND is_deleted = 0");
        }
        if status.is_some() {
            sql.push_str(" AND status = ?");
        }
        sql.push_str(" ORDER BY id ASC");

        let mut query = sqlx::query_as::<_, Task>(&sql).bind(user_id);
        if let Some(status) = status {
            query = query.bind(status);
        }

        let tasks = query
            .fetch_all(&self.pool)
            .await
            .context("Failed to list tasks")?;

        Ok(tasks)
    }

    /// Apply a partial update. Returns false if the task does not exist.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: &TaskUpdate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                status = COALESCE(?, status),
                priority = COALESCE(?, priority),
                updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.status)
        .bind(update.priority)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update task")?;

        Ok(result.rows_affected() > 0)
    }

    /// Flag a task as deleted. The row is kept.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE tasks SET is_deleted = 1, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to delete task")?;

        Ok(result.rows_affected() > 0)
    }
}
