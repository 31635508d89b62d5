//! Route definitions for the Taskboard API
//!
//! This module organizes all API routes and applies middleware.

use crate::auth::{csrf_guard, CSRF_HEADER};
use crate::config::SecurityConfig;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

mod auth;
mod extract;
mod health;
mod task;
mod user;

#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod test_helpers;

pub use auth::auth_routes;
pub use task::task_routes;
pub use user::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().security);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", api_routes(state.clone()))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Taskboard API v1" }))
        .nest("/auth", auth::auth_routes())
        .nest("/user", user::user_routes())
        .nest("/task", task::task_routes())
        .layer(middleware::from_fn_with_state(state, csrf_guard))
}

/// Cookies only travel cross-origin with credentials, which CORS forbids
/// for wildcard origins. Without configured origins the API stays open but
/// credential-less.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]);
    }

    let origins: Vec<HeaderValue> = security
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(CSRF_HEADER)])
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
