//! Database repositories
//!
//! Provides the data access layer. Handlers and services only see the
//! [`AccountStore`] and [`TaskStore`] traits; the Postgres implementations
//! back the running server and the in-memory ones back tests and local
//! runs without a database.

use async_trait::async_trait;
use taskboard_shared::{PublicUser, Task};
use thiserror::Error;

pub mod memory;
pub mod task;
pub mod user;

pub use memory::{InMemoryAccountStore, InMemoryTaskStore};
pub use task::PgTaskStore;
pub use user::{AccountRecord, PgAccountStore};

/// Errors surfaced by the stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Duplicate record")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Translate a sqlx error, recognising unique-constraint violations
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate,
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
}

/// Partial task update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Account lookups and writes
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create an account. Fails with [`StoreError::Duplicate`] when the email
    /// is already taken, leaving the existing account untouched.
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<PublicUser>;

    /// Find the credential record for a login attempt
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<AccountRecord>>;

    /// Find the public view of an account
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<PublicUser>>;

    /// Update the nick name when one is given. Returns `None` if the account
    /// does not exist.
    async fn update_nick_name(
        &self,
        id: i32,
        nick_name: Option<String>,
    ) -> StoreResult<Option<PublicUser>>;
}

/// Task queries. Everything except [`TaskStore::list_all`] is scoped to the
/// owning account.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, newest first
    async fn list_all(&self) -> StoreResult<Vec<Task>>;

    /// Tasks of one owner, newest first
    async fn list_by_owner(&self, user_id: i32) -> StoreResult<Vec<Task>>;

    async fn find_owned(&self, user_id: i32, task_id: i32) -> StoreResult<Option<Task>>;

    async fn create(&self, user_id: i32, input: NewTask) -> StoreResult<Task>;

    /// `None` when the task does not exist or belongs to someone else
    async fn update_owned(
        &self,
        user_id: i32,
        task_id: i32,
        changes: TaskChanges,
    ) -> StoreResult<Option<Task>>;

    /// `false` when the task does not exist or belongs to someone else
    async fn delete_owned(&self, user_id: i32, task_id: i32) -> StoreResult<bool>;
}
