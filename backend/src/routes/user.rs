//! Routes for the signed-in account

use super::extract::ApiJson;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use taskboard_shared::{PublicUser, UpdateUserRequest};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(get_user).patch(update_user))
}

/// GET /api/v1/user
async fn get_user(auth_user: AuthUser) -> Json<PublicUser> {
    Json(auth_user.user)
}

/// PATCH /api/v1/user
async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<PublicUser>> {
    let user = UserService::update(state.accounts(), auth_user.id(), req).await?;
    Ok(Json(user))
}
