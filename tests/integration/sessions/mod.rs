//! Sessions integration tests: /login, /authenticate, /logout

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::common::*;

mod login {
    use super::*;

    #[tokio::test]
    async fn test_login_sets_session_cookies() {
        let app = TestApp::new().await;
        let access = access_token_expiring_in(3600);
        app.mount_token_response(
            "authorization_code",
            200,
            token_grant(&access, Some("refresh-1")),
        )
        .await;

        let req = json_request(Method::POST, "/login", None, json!({ "auth_code": "code-1" }));
        let resp = app.test_router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let access_cookie = set_cookie_for(&resp, "access_token").unwrap();
        assert_eq!(cookie_value(&access_cookie), access);
        assert!(access_cookie.contains("HttpOnly"));
        assert!(access_cookie.contains("Secure"));
        assert!(access_cookie.contains("Path=/"));
        assert!(access_cookie.contains("Max-Age="));

        let refresh_cookie = set_cookie_for(&resp, "refresh_token").unwrap();
        assert_eq!(cookie_value(&refresh_cookie), "refresh-1");
        assert!(refresh_cookie.contains("HttpOnly"));
        assert!(!refresh_cookie.contains("Max-Age="));

        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Login successful");
    }

    #[tokio::test]
    async fn test_login_sends_code_with_pinned_redirect_uri() {
        let app = TestApp::new().await;
        app.mount_token_response(
            "authorization_code",
            200,
            token_grant(&access_token_expiring_in(3600), Some("refresh-1")),
        )
        .await;

        let req = json_request(Method::POST, "/login", None, json!({ "auth_code": "code-42" }));
        app.test_router().oneshot(req).await.unwrap();

        let requests = app.token_requests().await;
        assert_eq!(requests.len(), 1);
        let form = String::from_utf8(requests[0].body.clone()).unwrap();
        assert!(form.contains("grant_type=authorization_code"));
        assert!(form.contains("code=code-42"));
        assert!(form.contains("client_id=test-client"));
        assert!(form.contains("client_secret=test-secret"));
        assert!(form.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2F"));
    }

    #[tokio::test]
    async fn test_login_missing_auth_code_is_bad_request() {
        let app = TestApp::new().await;

        for body in [json!({}), json!({ "auth_code": "" }), json!({ "auth_code": null })] {
            let req = json_request(Method::POST, "/login", None, body);
            let resp = app.test_router().oneshot(req).await.unwrap();

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert!(set_cookies(&resp).is_empty());
            let body = parse_body(resp).await;
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }

        assert!(app.token_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_login_rejected_code_is_unauthorized() {
        let app = TestApp::new().await;
        app.mount_token_response(
            "authorization_code",
            400,
            json!({ "error": "invalid_grant" }),
        )
        .await;

        let req = json_request(Method::POST, "/login", None, json!({ "auth_code": "used" }));
        let resp = app.test_router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&resp).is_empty());
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "AUTHORIZATION_FAILED");
    }

    #[tokio::test]
    async fn test_login_success_status_without_access_token_is_unauthorized() {
        let app = TestApp::new().await;
        app.mount_token_response("authorization_code", 200, json!({ "error": "invalid_grant" }))
            .await;

        let req = json_request(Method::POST, "/login", None, json!({ "auth_code": "code-1" }));
        let resp = app.test_router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&resp).is_empty());
    }

    #[tokio::test]
    async fn test_login_token_endpoint_unreachable_is_server_error() {
        let app = TestApp::with_env(&[("JOBBER_TOKEN_URL", "http://127.0.0.1:1/api/oauth/token")])
            .await;

        let req = json_request(Method::POST, "/login", None, json!({ "auth_code": "code-1" }));
        let resp = app.test_router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "TOKEN_ENDPOINT_UNAVAILABLE");
    }
}

mod authenticate {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_with_session_cookie() {
        let app = TestApp::new().await;

        for cookie in ["access_token=anything", "refresh_token=r1"] {
            let req = empty_request(Method::GET, "/authenticate", Some(cookie));
            let resp = app.test_router().oneshot(req).await.unwrap();

            assert_eq!(resp.status(), StatusCode::OK);
            let body = parse_body(resp).await;
            assert_eq!(body["message"], "Success");
        }
    }

    #[tokio::test]
    async fn test_authenticate_without_cookie() {
        let app = TestApp::new().await;

        let req = empty_request(Method::GET, "/authenticate", None);
        let resp = app.test_router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "MISSING_SESSION");
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn test_logout_expires_both_cookies() {
        let app = TestApp::new().await;

        let cookie = session_cookie("a1", Some("r1"));
        let req = empty_request(Method::POST, "/logout", Some(&cookie));
        let resp = app.test_router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        for name in ["access_token", "refresh_token"] {
            let set_cookie = set_cookie_for(&resp, name).unwrap();
            assert_eq!(cookie_value(&set_cookie), "");
            assert!(set_cookie.contains("Max-Age=0"));
        }
    }
}
