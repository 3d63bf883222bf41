use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the lifecycle state of a task.
/// Corresponds to the `task_status` SQL enum; the wire and store spellings
/// are `"Pending"`, `"In-progress"`, `"Completed"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    Pending,
    #[sqlx(rename = "In-progress")]
    #[serde(rename = "In-progress")]
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// A task record as stored and as returned by the API. The id is assigned
/// by the store and is the sole lookup key.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}

/// Input for creating a task. The status is not accepted here: new tasks
/// always start out pending.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,

    pub due_date: Option<DateTime<Utc>>,
}

/// A partial update. Fields left absent, and strings left empty, keep the
/// stored value; consequently a field can never be cleared to empty through
/// an update, only overwritten.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub due_date: Option<DateTime<Utc>>,

    pub status: Option<TaskStatus>,
}

/// The fields the service hands to the store for insertion; the store
/// assigns the id.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
}

impl Task {
    /// Applies a partial update field by field. Zero values (absent fields,
    /// empty strings) leave the stored field unchanged, so a no-op patch is
    /// a silent success.
    pub fn apply(&mut self, patch: TaskUpdate) {
        if let Some(title) = patch.title {
            if !title.is_empty() {
                self.title = title;
            }
        }
        if let Some(description) = patch.description {
            if !description.is_empty() {
                self.description = description;
            }
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}
