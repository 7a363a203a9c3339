//! Personal tasks.

mod models;
mod repository;
mod service;

pub use models::{CreateTaskRequest, NewTask, Task, TaskUpdate};
pub use repository::{TaskRepository, Visibility};
pub use service::{TaskError, TaskService, normalize_status};
