//! Postgres-backed implementations of the store traits.
//!
//! Every query is wrapped in `tokio::time::timeout` with [`STORE_TIMEOUT`];
//! an elapsed bound converts to `AppError::Timeout` via `From`.

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::time::timeout;
use uuid::Uuid;

use super::{CredentialStore, TaskStore, STORE_TIMEOUT};
use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};

#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let query = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool);

        Ok(timeout(STORE_TIMEOUT, query).await??)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let query = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING id, email, password_hash, role, created_at",
        )
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool);

        Ok(timeout(STORE_TIMEOUT, query).await??)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        let query = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users",
        )
        .fetch_all(&self.pool);

        Ok(timeout(STORE_TIMEOUT, query).await??)
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, task: NewTask) -> Result<Task, AppError> {
        let query = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (title, description, due_date, status)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, description, due_date, status",
        )
        .bind(task.title)
        .bind(task.description)
        .bind(task.due_date)
        .bind(task.status)
        .fetch_one(&self.pool);

        Ok(timeout(STORE_TIMEOUT, query).await??)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let query = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, due_date, status FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool);

        Ok(timeout(STORE_TIMEOUT, query).await??)
    }

    async fn list(&self) -> Result<Vec<Task>, AppError> {
        let query = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, due_date, status FROM tasks",
        )
        .fetch_all(&self.pool);

        Ok(timeout(STORE_TIMEOUT, query).await??)
    }

    async fn update(&self, task: &Task) -> Result<(), AppError> {
        let query = sqlx::query(
            "UPDATE tasks SET title = $1, description = $2, due_date = $3, status = $4
             WHERE id = $5",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.status)
        .bind(task.id)
        .execute(&self.pool);

        timeout(STORE_TIMEOUT, query).await??;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let query = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = timeout(STORE_TIMEOUT, query).await??;
        Ok(result.rows_affected() > 0)
    }
}
