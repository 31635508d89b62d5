//! Task service
//!
//! Applies validation and the ownership rule on top of the task store. A
//! task that is missing and a task owned by someone else are reported the
//! same way.

use crate::error::ApiError;
use crate::metrics;
use crate::repositories::{NewTask, TaskChanges, TaskStore};
use taskboard_shared::validation::{validate_create_task, validate_update_task};
use taskboard_shared::{CreateTaskRequest, Task, UpdateTaskRequest};
use tracing::info;

/// Message for tasks the caller cannot see
pub const NO_SUCH_TASK: &str = "No such task";

fn no_such_task() -> ApiError {
    ApiError::Forbidden(NO_SUCH_TASK.to_string())
}

/// Task service for business logic
pub struct TaskService;

impl TaskService {
    /// Every task of every account, newest first
    pub async fn list_all(tasks: &dyn TaskStore) -> Result<Vec<Task>, ApiError> {
        Ok(tasks.list_all().await?)
    }

    /// The caller's tasks, newest first
    pub async fn list_own(tasks: &dyn TaskStore, user_id: i32) -> Result<Vec<Task>, ApiError> {
        Ok(tasks.list_by_owner(user_id).await?)
    }

    pub async fn get(tasks: &dyn TaskStore, user_id: i32, task_id: i32) -> Result<Task, ApiError> {
        tasks
            .find_owned(user_id, task_id)
            .await?
            .ok_or_else(no_such_task)
    }

    pub async fn create(
        tasks: &dyn TaskStore,
        user_id: i32,
        req: CreateTaskRequest,
    ) -> Result<Task, ApiError> {
        validate_create_task(&req)?;

        let task = tasks
            .create(
                user_id,
                NewTask {
                    title: req.title.trim().to_string(),
                    description: req.description,
                },
            )
            .await?;

        metrics::record_task_created();
        info!(user_id, task_id = task.id, "Task created");
        Ok(task)
    }

    pub async fn update(
        tasks: &dyn TaskStore,
        user_id: i32,
        task_id: i32,
        req: UpdateTaskRequest,
    ) -> Result<Task, ApiError> {
        validate_update_task(&req)?;

        let changes = TaskChanges {
            title: req.title.map(|t| t.trim().to_string()),
            description: req.description,
        };
        tasks
            .update_owned(user_id, task_id, changes)
            .await?
            .ok_or_else(no_such_task)
    }

    pub async fn delete(tasks: &dyn TaskStore, user_id: i32, task_id: i32) -> Result<(), ApiError> {
        if !tasks.delete_owned(user_id, task_id).await? {
            return Err(no_such_task());
        }
        info!(user_id, task_id, "Task deleted");
        Ok(())
    }
}
