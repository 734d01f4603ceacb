use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: i32,
    /// The title of the task. Between 1 and 100 characters.
    pub title: String,
    /// Free-form body text. Empty when the task was created without one.
    pub content: String,
    /// Whether the task has been marked as done.
    pub completed: bool,
    /// Identifier of the user who owns the task.
    pub user_id: i32,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `TaskRepository::create`. New tasks always start out
/// not completed.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

/// Input structure for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// The title of the task. Must be between 1 and 100 characters.
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    /// Optional body text; defaults to empty when omitted.
    #[serde(default)]
    pub content: String,
}

/// Partial-update payload for a task. Absent fields are left as they are.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub completed: Option<bool>,
}
