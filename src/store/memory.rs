use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskPatch, User};
use crate::store::{CredentialStore, TaskStore};

/// In-memory user store, for tests and database-less local runs.
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: RwLock<HashMap<Uuid, User>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.username == username) {
            // Mirrors the unique constraint on users.username.
            return Err(AppError::BadRequest("User already exists".into()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory task store. The ownership condition on update/delete is applied
/// under the same write lock as the mutation, like the conditional SQL
/// statements in the Postgres store.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.read().unwrap().get(&id).cloned())
    }

    async fn find_all_by_owner(&self, owner: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().unwrap();
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn create(&self, task: Task) -> Result<Task, AppError> {
        self.tasks
            .write()
            .unwrap()
            .insert(task.id, task.clone());
        Ok(task)
    }

    async fn create_many(&self, tasks: Vec<Task>) -> Result<(), AppError> {
        let mut store = self.tasks.write().unwrap();
        for task in tasks {
            store.insert(task.id, task);
        }
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().unwrap();
        match tasks.get_mut(&id) {
            Some(task) if task.user_id == owner => {
                task.apply(patch);
                Ok(Some(task.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<bool, AppError> {
        let mut tasks = self.tasks.write().unwrap();
        match tasks.get(&id) {
            Some(task) if task.user_id == owner => {
                tasks.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
