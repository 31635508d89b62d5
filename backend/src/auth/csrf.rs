//! CSRF protection (double-submit cookie)
//!
//! `GET /api/v1/auth/csrf` hands out a random token in both a cookie and the
//! response body. State-changing requests must echo it in the `csrf-token`
//! header.

use super::cookie::CSRF_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use subtle::ConstantTimeEq;
use tracing::debug;
use uuid::Uuid;

/// Header the client echoes the token in
pub const CSRF_HEADER: &str = "csrf-token";

/// Generate a fresh CSRF token
pub fn new_csrf_token() -> String {
    Uuid::new_v4().simple().to_string()
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Constant-time comparison; an empty header never matches
fn tokens_match(header_token: &str, cookie_token: &str) -> bool {
    !header_token.is_empty() && bool::from(header_token.as_bytes().ct_eq(cookie_token.as_bytes()))
}

/// Middleware rejecting state-changing requests without a matching token
pub async fn csrf_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config().security.csrf_protection || is_safe_method(request.method()) {
        return Ok(next.run(request).await);
    }

    let header_token = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let jar = CookieJar::from_headers(request.headers());
    let cookie_token = jar.get(CSRF_COOKIE).map(|c| c.value()).unwrap_or_default();

    if !tokens_match(header_token, cookie_token) {
        debug!(method = %request.method(), uri = %request.uri(), "Rejected request: CSRF token mismatch");
        return Err(ApiError::Forbidden("Invalid CSRF token".to_string()));
    }

    Ok(next.run(request).await)
}
