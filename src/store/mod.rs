//!
//! # Store Collaborators
//!
//! The persistence engines are external collaborators behind two small
//! record-oriented traits: `CredentialStore` for user records and
//! `TaskStore` for task records. Handlers depend only on these traits;
//! `postgres` provides the production sqlx implementations and `memory`
//! provides in-memory ones for tests and database-less local runs.
//!
//! `TaskStore::update` and `TaskStore::delete` take the expected owner and
//! apply it in the same statement as the mutation, so the ownership check
//! and the write cannot race against a concurrent request for the same id.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskPatch, User};

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Persists a new user, assigning id and creation time.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// All tasks owned by `owner`, newest creation first.
    async fn find_all_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, AppError>;

    async fn create(&self, task: Task) -> Result<Task, AppError>;

    /// Bulk insert, used for the onboarding seed at registration.
    async fn create_many(&self, tasks: Vec<Task>) -> Result<(), AppError>;

    /// Conditionally applies `patch` to the task with `id` owned by `owner`.
    /// Returns `None` when no such row matches (absent, or owned by someone
    /// else) at the moment of the write.
    async fn update(&self, id: Uuid, owner: Uuid, patch: TaskPatch)
        -> Result<Option<Task>, AppError>;

    /// Conditionally deletes; returns whether a matching row was removed.
    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, AppError>;
}
