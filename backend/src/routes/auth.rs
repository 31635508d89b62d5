//! Authentication routes
//!
//! Signup, cookie-based login and logout, plus the CSRF token handshake.

use super::extract::ApiJson;
use crate::auth::cookie::{cleared_session_cookie, csrf_cookie, session_cookie};
use crate::auth::new_csrf_token;
use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use taskboard_shared::{AuthRequest, CsrfTokenResponse, MessageResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/csrf", get(csrf_token))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Issue a CSRF token
///
/// GET /api/v1/auth/csrf
async fn csrf_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<CsrfTokenResponse>) {
    let token = new_csrf_token();
    let jar = jar.add(csrf_cookie(token.clone(), state.config().cookie.secure));
    (jar, Json(CsrfTokenResponse { csrf_token: token }))
}

/// Register a new account
///
/// POST /api/v1/auth/signup
async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AuthRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    AuthService::signup(state.accounts(), &state.passwords, &req).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::ok())))
}

/// Login with email and password; the token is set as the session cookie
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<AuthRequest>,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let token = AuthService::login(state.accounts(), state.tokens(), &req).await?;
    let jar = jar.add(session_cookie(token, state.config().cookie.secure));
    Ok((jar, Json(MessageResponse::ok())))
}

/// Logout
///
/// POST /api/v1/auth/logout
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(cleared_session_cookie(state.config().cookie.secure));
    (jar, Json(MessageResponse::ok()))
}
