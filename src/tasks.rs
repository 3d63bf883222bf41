//! Task lifecycle logic over a [`TaskStore`].

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, Task, TaskInput, TaskStatus, TaskUpdate};
use crate::store::TaskStore;

/// CRUD over the task store, with identifier parsing and the partial-update
/// policy applied here rather than in the handlers.
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// A syntactically invalid identifier is its own failure, distinct from
    /// a well-formed identifier that is simply absent.
    fn parse_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw).map_err(|_| AppError::InvalidId("Invalid task id".into()))
    }

    /// Creates a task. New tasks always start out pending, whatever the
    /// caller sent; the store assigns the id.
    pub async fn create(&self, input: TaskInput) -> Result<Task, AppError> {
        self.store
            .create(NewTask {
                title: input.title,
                description: input.description,
                due_date: input.due_date,
                status: TaskStatus::Pending,
            })
            .await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Task, AppError> {
        let id = Self::parse_id(raw_id)?;
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn list(&self) -> Result<Vec<Task>, AppError> {
        self.store.list().await
    }

    /// Looks the record up first so a missing id reports `NotFound`
    /// unambiguously, then applies the patch and writes the full record
    /// back. Empty patch fields leave the stored values alone.
    pub async fn update(&self, raw_id: &str, patch: TaskUpdate) -> Result<Task, AppError> {
        let mut task = self.get(raw_id).await?;
        task.apply(patch);
        self.store.update(&task).await?;
        Ok(task)
    }

    /// Removes a task. Of two concurrent deletes of the same id, only the
    /// one that observed the record present succeeds; the other reports
    /// `NotFound`.
    pub async fn delete(&self, raw_id: &str) -> Result<(), AppError> {
        let id = Self::parse_id(raw_id)?;
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}
