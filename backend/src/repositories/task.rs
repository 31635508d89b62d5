//! Task repository backed by PostgreSQL
//!
//! Every single-row query filters on both `id` and `user_id`, so a task
//! owned by someone else behaves exactly like a missing one.

use super::{NewTask, StoreResult, TaskChanges, TaskStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskboard_shared::Task;

/// Task record from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct TaskRecord {
    id: i32,
    title: String,
    description: Option<String>,
    user_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Task {
            id: record.id,
            title: record.title,
            description: record.description,
            user_id: record.user_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Task store for database operations
#[derive(Debug, Clone)]
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
    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        let records = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM tasks
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn list_by_owner(&self, user_id: i32) -> StoreResult<Vec<Task>> {
        let records = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn find_owned(&self, user_id: i32, task_id: i32) -> StoreResult<Option<Task>> {
        let record = sqlx::query_as::<_, TaskRecord>(
            r#"
            SELECT id, title, description, user_id, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn create(&self, user_id: i32, input: NewTask) -> StoreResult<Task> {
        let record = sqlx::query_as::<_, TaskRecord>(
            r#"
            INSERT INTO tasks (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, user_id, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    async fn update_owned(
        &self,
        user_id: i32,
        task_id: i32,
        changes: TaskChanges,
    ) -> StoreResult<Option<Task>> {
        let record = sqlx::query_as::<_, TaskRecord>(
            r#"
            UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, user_id, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .bind(changes.title)
        .bind(changes.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    async fn delete_owned(&self, user_id: i32, task_id: i32) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
