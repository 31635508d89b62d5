//! In-memory stores
//!
//! Same contracts as the Postgres stores, kept in process memory. Used by
//! the router tests and by development runs with an empty database URL.

use super::{
    AccountRecord, AccountStore, NewTask, StoreError, StoreResult, TaskChanges, TaskStore,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use taskboard_shared::{PublicUser, Task};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredAccount {
    password_hash: String,
    user: PublicUser,
}

#[derive(Debug, Default)]
struct Accounts {
    next_id: i32,
    by_id: BTreeMap<i32, StoredAccount>,
}

/// Account store held in memory
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<Accounts>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<PublicUser> {
        let mut accounts = self.inner.write().await;
        if accounts.by_id.values().any(|a| a.user.email == email) {
            return Err(StoreError::Duplicate);
        }

        accounts.next_id += 1;
        let now = Utc::now();
        let user = PublicUser {
            id: accounts.next_id,
            email: email.to_string(),
            nick_name: None,
            created_at: now,
            updated_at: now,
        };
        accounts.by_id.insert(
            user.id,
            StoredAccount {
                password_hash: password_hash.to_string(),
                user: user.clone(),
            },
        );

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AccountRecord>> {
        let accounts = self.inner.read().await;
        Ok(accounts
            .by_id
            .values()
            .find(|a| a.user.email == email)
            .map(|a| AccountRecord {
                id: a.user.id,
                email: a.user.email.clone(),
                password_hash: a.password_hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<PublicUser>> {
        let accounts = self.inner.read().await;
        Ok(accounts.by_id.get(&id).map(|a| a.user.clone()))
    }

    async fn update_nick_name(
        &self,
        id: i32,
        nick_name: Option<String>,
    ) -> StoreResult<Option<PublicUser>> {
        let mut accounts = self.inner.write().await;
        let Some(account) = accounts.by_id.get_mut(&id) else {
            return Ok(None);
        };
        if nick_name.is_some() {
            account.user.nick_name = nick_name;
        }
        account.user.updated_at = Utc::now();
        Ok(Some(account.user.clone()))
    }
}

#[derive(Debug, Default)]
struct Tasks {
    next_id: i32,
    by_id: BTreeMap<i32, Task>,
}

/// Task store held in memory
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    inner: RwLock<Tasks>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; ids break ties between tasks created in the same instant
fn newest_first(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    tasks
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        let tasks = self.inner.read().await;
        Ok(newest_first(tasks.by_id.values().cloned().collect()))
    }

    async fn list_by_owner(&self, user_id: i32) -> StoreResult<Vec<Task>> {
        let tasks = self.inner.read().await;
        Ok(newest_first(
            tasks
                .by_id
                .values()
                .filter(|t| t.is_owned_by(user_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_owned(&self, user_id: i32, task_id: i32) -> StoreResult<Option<Task>> {
        let tasks = self.inner.read().await;
        Ok(tasks
            .by_id
            .get(&task_id)
            .filter(|t| t.is_owned_by(user_id))
            .cloned())
    }

    async fn create(&self, user_id: i32, input: NewTask) -> StoreResult<Task> {
        let mut tasks = self.inner.write().await;
        tasks.next_id += 1;
        let now = Utc::now();
        let task = Task {
            id: tasks.next_id,
            title: input.title,
            description: input.description,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tasks.by_id.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_owned(
        &self,
        user_id: i32,
        task_id: i32,
        changes: TaskChanges,
    ) -> StoreResult<Option<Task>> {
        let mut tasks = self.inner.write().await;
        let Some(task) = tasks
            .by_id
            .get_mut(&task_id)
            .filter(|t| t.is_owned_by(user_id))
        else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_owned(&self, user_id: i32, task_id: i32) -> StoreResult<bool> {
        let mut tasks = self.inner.write().await;
        let owned = tasks
            .by_id
            .get(&task_id)
            .is_some_and(|t| t.is_owned_by(user_id));
        if owned {
            tasks.by_id.remove(&task_id);
        }
        Ok(owned)
    }
}
