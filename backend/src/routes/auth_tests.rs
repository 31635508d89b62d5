//! Property-based and router tests for authentication
//!
//! Every request to a protected endpoint without a valid session cookie
//! returns 401, and the cookie flow (signup, login, logout) behaves as a
//! browser client expects.

#[cfg(test)]
mod tests {
    use crate::auth::CSRF_HEADER;
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::routes::test_helpers::{
        empty_request, json_request, login_as, send, test_app, test_config, test_state,
    };
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use fake::{faker::internet::en::SafeEmail, Fake};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use proptest::prelude::*;
    use serde_json::json;
    use tower::ServiceExt;

    /// Generate random invalid cookie headers
    fn cookie_header_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            // No cookie at all
            Just(None),
            // Empty session cookie
            Just(Some("access_token=".to_string())),
            // Random string (not a valid JWT)
            "[a-zA-Z0-9]{10,50}".prop_map(|t| Some(format!("access_token={}", t))),
            // Valid format but invalid signature
            "[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}\\.[a-zA-Z0-9_-]{20}"
                .prop_map(|t| Some(format!("access_token={}", t))),
            // Token under the wrong cookie name
            "[a-zA-Z0-9]{10,50}".prop_map(|t| Some(format!("session={}", t))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: requests without a valid session return 401
        #[test]
        fn prop_unauthenticated_requests_return_401(cookie in cookie_header_strategy()) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let app = create_router(test_state());

                for uri in ["/api/v1/user", "/api/v1/task", "/api/v1/task/1"] {
                    let request = empty_request("GET", uri, cookie.as_deref());
                    let response = app.clone().oneshot(request).await.unwrap();

                    prop_assert_eq!(
                        response.status(),
                        StatusCode::UNAUTHORIZED,
                        "Expected 401 for unauthenticated request to {}",
                        uri
                    );
                }

                Ok(())
            })?;
        }
    }

    #[tokio::test]
    async fn test_missing_cookie_returns_401_with_error_body() {
        let (app, _) = test_app();

        let response = send(&app, empty_request("GET", "/api/v1/user", None)).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(response.body["error"]["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_signup_login_and_fetch_user() {
        let (app, _) = test_app();
        let email: String = SafeEmail().fake();

        let signup = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/signup",
                None,
                json!({ "email": email, "password": "secret1" }),
            ),
        )
        .await;
        assert_eq!(signup.status, StatusCode::CREATED);
        assert_eq!(signup.body, json!({ "message": "OK" }));

        let login = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/login",
                None,
                json!({ "email": email, "password": "secret1" }),
            ),
        )
        .await;
        assert_eq!(login.status, StatusCode::OK);
        assert_eq!(login.body, json!({ "message": "OK" }));
        let cookie = login.set_cookie.unwrap();
        assert!(cookie.starts_with("access_token="));
        assert!(cookie.len() > "access_token=".len());

        let me = send(&app, empty_request("GET", "/api/v1/user", Some(&cookie))).await;
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body["email"], email.as_str());
        assert!(me.body["nick_name"].is_null());
        assert!(me.body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_cookie_attributes() {
        let (app, _) = test_app();
        login_as(&app, "a@example.com", "secret1").await;

        let request = json_request(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": "a@example.com", "password": "secret1" }),
        );
        let response = app.oneshot(request).await.unwrap();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();

        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Secure"));
        assert!(set_cookie.contains("SameSite=None"));
        assert!(set_cookie.contains("Path=/"));
    }

    #[tokio::test]
    async fn test_malformed_credentials_use_error_envelope() {
        let (app, _) = test_app();

        for uri in ["/api/v1/auth/signup", "/api/v1/auth/login"] {
            let missing_password = send(
                &app,
                json_request("POST", uri, None, json!({ "email": "a@example.com" })),
            )
            .await;
            assert_eq!(missing_password.status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(missing_password.body["error"]["code"], "VALIDATION_ERROR");
            assert!(missing_password.set_cookie.is_none());
        }

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\": "))
            .unwrap();
        let truncated = send(&app, request).await;
        assert_eq!(truncated.status, StatusCode::BAD_REQUEST);
        assert_eq!(truncated.body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_forbidden() {
        let (app, _) = test_app();
        login_as(&app, "a@example.com", "secret1").await;

        let again = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/signup",
                None,
                json!({ "email": "a@example.com", "password": "other-pw" }),
            ),
        )
        .await;

        assert_eq!(again.status, StatusCode::FORBIDDEN);
        assert_eq!(
            again.body["error"]["message"],
            "This email address is already registered"
        );
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let (app, _) = test_app();
        login_as(&app, "a@example.com", "secret1").await;

        let wrong_password = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/login",
                None,
                json!({ "email": "a@example.com", "password": "wrong-pw" }),
            ),
        )
        .await;
        let unknown_email = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/login",
                None,
                json!({ "email": "b@example.com", "password": "secret1" }),
            ),
        )
        .await;

        assert_eq!(wrong_password.status, StatusCode::FORBIDDEN);
        assert_eq!(wrong_password.body, unknown_email.body);
        assert_eq!(
            wrong_password.body["error"]["message"],
            "Email or password is incorrect"
        );
        assert!(wrong_password.set_cookie.is_none());
    }

    #[tokio::test]
    async fn test_signup_validation_names_the_field() {
        let (app, _) = test_app();

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/signup",
                None,
                json!({ "email": "not-an-email", "password": "secret1" }),
            ),
        )
        .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(response.body["error"]["field"], "email");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (app, _) = test_app();
        let cookie = login_as(&app, "a@example.com", "secret1").await;

        let logout = send(&app, empty_request("POST", "/api/v1/auth/logout", Some(&cookie))).await;

        assert_eq!(logout.status, StatusCode::OK);
        assert_eq!(logout.set_cookie.as_deref(), Some("access_token="));
    }

    #[tokio::test]
    async fn test_update_nick_name() {
        let (app, _) = test_app();
        let cookie = login_as(&app, "a@example.com", "secret1").await;

        let updated = send(
            &app,
            json_request("PATCH", "/api/v1/user", Some(&cookie), json!({ "nick_name": "alice" })),
        )
        .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["nick_name"], "alice");

        let me = send(&app, empty_request("GET", "/api/v1/user", Some(&cookie))).await;
        assert_eq!(me.body["nick_name"], "alice");
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let (app, state) = test_app();
        let cookie = login_as(&app, "a@example.com", "secret1").await;
        let me = send(&app, empty_request("GET", "/api/v1/user", Some(&cookie))).await;
        let id = me.body["id"].as_i64().unwrap() as i32;

        let issued = Utc::now() - Duration::seconds(301);
        let token = state.tokens().issue_at(id, "a@example.com", issued).unwrap();
        let cookie = format!("access_token={}", token);

        let response = send(&app, empty_request("GET", "/api/v1/user", Some(&cookie))).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_for_missing_account_is_rejected() {
        let (app, state) = test_app();

        let token = state.tokens().issue(999, "ghost@example.com").unwrap();
        let cookie = format!("access_token={}", token);

        let response = send(&app, empty_request("GET", "/api/v1/user", Some(&cookie))).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let (app, _) = test_app();

        let mut other_config = AppConfig::default();
        other_config.jwt.secret = secrecy::SecretString::new("a-different-secret".to_string());
        let other = AppState::in_memory(other_config).unwrap();
        let token = other.tokens().issue(1, "a@example.com").unwrap();
        let cookie = format!("access_token={}", token);

        let response = send(&app, empty_request("GET", "/api/v1/user", Some(&cookie))).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    fn csrf_app() -> axum::Router {
        let mut config = test_config();
        config.security.csrf_protection = true;
        create_router(AppState::in_memory(config).unwrap())
    }

    #[tokio::test]
    async fn test_csrf_rejects_missing_token() {
        let app = csrf_app();

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/v1/auth/signup",
                None,
                json!({ "email": "a@example.com", "password": "secret1" }),
            ),
        )
        .await;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body["error"]["message"], "Invalid CSRF token");
    }

    #[tokio::test]
    async fn test_csrf_double_submit_is_accepted() {
        let app = csrf_app();

        let issued = send(&app, empty_request("GET", "/api/v1/auth/csrf", None)).await;
        assert_eq!(issued.status, StatusCode::OK);
        let token = issued.body["csrf_token"].as_str().unwrap().to_string();
        let cookie = issued.set_cookie.unwrap();
        assert_eq!(cookie, format!("_csrf={}", token));

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, &cookie)
            .header(CSRF_HEADER, &token)
            .body(Body::from(
                json!({ "email": "a@example.com", "password": "secret1" }).to_string(),
            ))
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status, StatusCode::CREATED);

        // Header not matching the cookie
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/logout")
            .header(header::COOKIE, &cookie)
            .header(CSRF_HEADER, "something-else")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_csrf_ignores_safe_methods() {
        let app = csrf_app();

        let response = send(&app, empty_request("GET", "/api/v1/task/all", None)).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[test]
    fn test_metrics_endpoint_reports_login_outcomes() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let app = create_router(test_state().with_metrics(recorder.handle()));
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let exposition = metrics::with_local_recorder(&recorder, || {
            rt.block_on(async {
                login_as(&app, "a@example.com", "secret1").await;
                let rejected = send(
                    &app,
                    json_request(
                        "POST",
                        "/api/v1/auth/login",
                        None,
                        json!({ "email": "a@example.com", "password": "wrong-pw" }),
                    ),
                )
                .await;
                assert_eq!(rejected.status, StatusCode::FORBIDDEN);

                send(&app, empty_request("GET", "/metrics", None)).await
            })
        });

        assert_eq!(exposition.status, StatusCode::OK);
        let text = exposition.body.as_str().unwrap();
        assert!(text.contains(r#"taskboard_logins_total{outcome="success"} 1"#), "{}", text);
        assert!(
            text.contains(r#"taskboard_logins_total{outcome="invalid_credentials"} 1"#),
            "{}",
            text
        );
    }

    #[tokio::test]
    async fn test_metrics_endpoint_absent_without_recorder() {
        let (app, _) = test_app();
        let response = send(&app, empty_request("GET", "/metrics", None)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
