//! Cookies carrying the session token and the CSRF secret
//!
//! Both use `HttpOnly; Secure; SameSite=None; Path=/` so a separately
//! hosted frontend can send them on credentialed requests. `Secure` can be
//! switched off through `cookie.secure` for plain-http local development.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie holding the session token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie holding the CSRF token
pub const CSRF_COOKIE: &str = "_csrf";

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// Session cookie for a freshly issued token
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    base_cookie(ACCESS_TOKEN_COOKIE, token, secure)
}

/// Overwrites the session cookie with an empty, already expired value
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(ACCESS_TOKEN_COOKIE, String::new(), secure);
    cookie.make_removal();
    cookie
}

pub fn csrf_cookie(token: String, secure: bool) -> Cookie<'static> {
    base_cookie(CSRF_COOKIE, token, secure)
}
