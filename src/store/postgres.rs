use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskPatch, User};
use crate::store::{CredentialStore, TaskStore};

// Runtime-checked queries throughout: the `query!` macros need a live
// database at compile time, which this crate does not assume.

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
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}

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
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, text, details, priority, created_at FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn find_all_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_id, text, details, priority, created_at
             FROM tasks WHERE user_id = $1
             ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn create(&self, task: Task) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, user_id, text, details, priority, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, user_id, text, details, priority, created_at",
        )
        .bind(task.id)
        .bind(task.user_id)
        .bind(task.text)
        .bind(task.details)
        .bind(task.priority)
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    async fn create_many(&self, tasks: Vec<Task>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for task in tasks {
            sqlx::query(
                "INSERT INTO tasks (id, user_id, text, details, priority, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(task.id)
            .bind(task.user_id)
            .bind(task.text)
            .bind(task.details)
            .bind(task.priority)
            .bind(task.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>, AppError> {
        // One conditional statement: ownership is re-checked in the same
        // write that applies the patch. COALESCE keeps columns whose patch
        // field was omitted.
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET text = COALESCE($3, text),
                 details = COALESCE($4, details),
                 priority = COALESCE($5, priority)
             WHERE id = $1 AND user_id = $2
             RETURNING id, user_id, text, details, priority, created_at",
        )
        .bind(id)
        .bind(owner)
        .bind(patch.text.map(|t| t.trim().to_string()))
        .bind(patch.details.map(|d| d.trim().to_string()))
        .bind(patch.priority)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
