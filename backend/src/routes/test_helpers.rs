//! Router harness over in-memory stores

use crate::config::{AppConfig, PasswordAlgorithm};
use crate::routes::create_router;
use crate::state::AppState;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.password.algorithm = PasswordAlgorithm::Bcrypt;
    config.password.bcrypt_cost = 4;
    config.security.csrf_protection = false;
    config
}

pub fn test_state() -> AppState {
    AppState::in_memory(test_config()).unwrap()
}

pub fn test_app() -> (Router, AppState) {
    let state = test_state();
    (create_router(state.clone()), state)
}

pub struct TestResponse {
    pub status: StatusCode,
    /// `name=value` of the first Set-Cookie header, attributes stripped
    pub set_cookie: Option<String>,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        set_cookie,
        body,
    }
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Sign up and log in, returning the session cookie pair
pub async fn login_as(app: &Router, email: &str, password: &str) -> String {
    let credentials = json!({ "email": email, "password": password });

    let signup = send(
        app,
        json_request("POST", "/api/v1/auth/signup", None, credentials.clone()),
    )
    .await;
    assert_eq!(signup.status, StatusCode::CREATED);

    let login = send(app, json_request("POST", "/api/v1/auth/login", None, credentials)).await;
    assert_eq!(login.status, StatusCode::OK);
    login.set_cookie.expect("login sets the session cookie")
}
