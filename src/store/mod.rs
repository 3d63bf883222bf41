//! Persistence capabilities.
//!
//! The two traits here are the only way the services touch durable state.
//! Production uses the Postgres implementations in [`postgres`]; tests
//! substitute in-memory fakes. Uniqueness pre-checks and existence checks
//! belong to the callers; the stores only move records.

pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};

/// Upper bound on any single call to the backing store. The store is a
/// network-attached service; without a bound a partial network failure
/// could hold a request indefinitely.
pub const STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Durable mapping from email to account record.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Inserts a new account. The store assigns id and created_at; the
    /// caller is responsible for the email uniqueness pre-check.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// All accounts, materialized, in backing-store order.
    async fn list_all(&self) -> Result<Vec<User>, AppError>;
}

/// Durable mapping from task id to task record.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new task and returns it with its store-assigned id.
    async fn create(&self, task: NewTask) -> Result<Task, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// All tasks, materialized.
    async fn list(&self) -> Result<Vec<Task>, AppError>;

    /// Writes the full record back under its id. Writing an absent id is
    /// not an error here; existence is the caller's lookup to make.
    async fn update(&self, task: &Task) -> Result<(), AppError>;

    /// Removes the record, reporting whether anything was there. Under two
    /// concurrent deletes of one id only the first observes `true`.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
