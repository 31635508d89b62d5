//! Authentication extractor
//!
//! Reads the session token from the `access_token` cookie, verifies it with
//! the token manager from AppState and re-resolves the live account.

use super::cookie::ACCESS_TOKEN_COOKIE;
use crate::error::ApiError;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{extract::FromRef, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use taskboard_shared::PublicUser;

/// Authenticated account extracted from the session cookie
///
/// Rejects with 401 when the cookie is missing or empty, the token fails
/// verification, or the account no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: PublicUser,
}

impl AuthUser {
    #[inline]
    pub fn id(&self) -> i32 {
        self.user.id
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(ACCESS_TOKEN_COOKIE).map(|cookie| cookie.value());

        let user =
            AuthService::resolve_session(app_state.accounts(), app_state.tokens(), token).await?;

        Ok(AuthUser { user })
    }
}
