//! Task data models and their JSON wire shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Task entity. Serializes with the field names the web client expects.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Task {
    #[serde(rename = "taskID")]
    pub id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "task_Name")]
    pub name: String,
    #[serde(rename = "task_Description")]
    pub description: String,
    #[serde(rename = "task_Status")]
    pub status: String,
    #[serde(rename = "task_Priority")]
    pub priority: i64,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
    #[serde(skip)]
    pub created_at: String,
    #[serde(skip)]
    pub updated_at: String,
}

/// Body of a create request.
///
/// Fields are optional here so that missing values surface as validation
/// errors rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    #[serde(rename = "task_Name", alias = "Task_Name", alias = "task_name")]
    pub name: Option<String>,
    #[serde(
        rename = "task_Description",
        alias = "Task_Description",
        alias = "task_description"
    )]
    pub description: Option<String>,
    #[serde(rename = "task_Status", alias = "Task_Status", alias = "task_status")]
    pub status: Option<String>,
    #[serde(
        rename = "task_Priority",
        alias = "Task_Priority",
        alias = "task_priority"
    )]
    pub priority: Option<Value>,
}

/// Validated insert payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub status: String,
    pub priority: i64,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i64>,
}

impl TaskUpdate {
    /// Build an update from a loose JSON object.
    ///
    /// Keys match case-insensitively; unknown keys are ignored. Non-string
    /// values for text fields are stored in their JSON text form. Returns the
    /// offending key if the priority is not an integer.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, String> {
        let mut update = TaskUpdate::default();
        for (key, value) in fields {
            match key.to_lowercase().as_str() {
                "task_name" => update.name = Some(value_text(value)),
                "task_description" => update.description = Some(value_text(value)),
                "task_status" => update.status = Some(value_text(value)),
                "task_priority" => {
                    update.priority = Some(parse_priority(value).ok_or_else(|| key.clone())?)
                }
                _ => {}
            }
        }
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Integer priority from a JSON number or a numeric string.
pub(crate) fn parse_priority(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
