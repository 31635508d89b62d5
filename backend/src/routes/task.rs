//! Task routes
//!
//! Endpoints for creating, reading, updating, and deleting tasks. Everything
//! except the public `/all` listing is scoped to the authenticated owner.

use super::extract::{ApiJson, ApiPath};
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::TaskService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use taskboard_shared::{CreateTaskRequest, Task, UpdateTaskRequest};

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/all", get(list_all_tasks))
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", get(get_task).patch(update_task).delete(delete_task))
}

/// List every task
///
/// GET /api/v1/task/all
async fn list_all_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = TaskService::list_all(state.tasks()).await?;
    Ok(Json(tasks))
}

/// List the caller's tasks
///
/// GET /api/v1/task
async fn list_tasks(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = TaskService::list_own(state.tasks(), auth_user.id()).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/task/:id
async fn get_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Task>> {
    let task = TaskService::get(state.tasks(), auth_user.id(), id).await?;
    Ok(Json(task))
}

/// POST /api/v1/task
async fn create_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = TaskService::create(state.tasks(), auth_user.id(), req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/v1/task/:id
async fn update_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let task = TaskService::update(state.tasks(), auth_user.id(), id, req).await?;
    Ok(Json(task))
}

/// DELETE /api/v1/task/:id
async fn delete_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    TaskService::delete(state.tasks(), auth_user.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
