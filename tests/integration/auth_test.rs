//! Integration tests for the authentication flow.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};
use servicehub_core::types::id::UserId;
use servicehub_database::store::SessionStore;

#[tokio::test]
async fn test_login_success_sets_refresh_cookie() {
    let app = TestApp::new().await;
    app.register_client("ada@example.com").await;

    let response = app.login_response("ada@example.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert!(response.data()["access_token"].is_string());
    assert!(response.data()["session_id"].is_string());
    assert!(response.data().get("refresh_token").is_none());

    let cookie = response
        .set_cookies
        .iter()
        .find(|c| c.starts_with("refresh_token="))
        .expect("refresh cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=2592000"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register_client("ada@example.com").await;

    let wrong = app.login_response("ada@example.com", "Wr0ng-pass!").await;
    let unknown = app.login_response("nobody@example.com", PASSWORD).await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(wrong.error_tag(), "UNAUTHORIZED_ERROR");
    assert_eq!(wrong.message(), "invalid credentials");
}

#[tokio::test]
async fn test_login_rejects_malformed_credentials() {
    let app = TestApp::new().await;

    let response = app.login_response("not-an-email", PASSWORD).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_tag(), "BAD_REQUEST_ERROR");
    assert_eq!(response.message(), "invalid email format");

    let response = app.login_response("ada@example.com", "short").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disabled_user_cannot_login() {
    let app = TestApp::new().await;
    let id: UserId = app.register_client("ada@example.com").await.parse().unwrap();
    app.store.soft_delete_user(id).await.unwrap();

    let response = app.login_response("ada@example.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_tag(), "DISABLED_USER_ERROR");
    assert_eq!(response.message(), "user must be active to login");
}

#[tokio::test]
async fn test_second_login_supersedes_first() {
    let app = TestApp::new().await;
    let id: UserId = app.register_client("ada@example.com").await.parse().unwrap();

    let (_, first_refresh) = app.login("ada@example.com", PASSWORD).await;
    let (_, second_refresh) = app.login("ada@example.com", PASSWORD).await;

    let sessions = app.store.find_all_by_user(id).await.unwrap();
    assert_eq!(sessions.iter().filter(|s| s.is_active()).count(), 1);

    let stale = app
        .request_with_cookie("POST", "/api/v1/auth/refresh", &first_refresh)
        .await;
    assert_eq!(stale.status, StatusCode::BAD_REQUEST);
    assert_eq!(stale.message(), "invalid or inactive session");

    let fresh = app
        .request_with_cookie("POST", "/api/v1/auth/refresh", &second_refresh)
        .await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_issues_usable_access_token() {
    let app = TestApp::new().await;
    app.register_client("ada@example.com").await;
    let (_, refresh) = app.login("ada@example.com", PASSWORD).await;

    let response = app
        .request_with_cookie("POST", "/api/v1/auth/refresh", &refresh)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let access = response.data()["access_token"].as_str().unwrap().to_string();

    let me = app
        .request("GET", "/api/v1/users/me", None, Some(&access))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], json!("ada@example.com"));
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/v1/auth/refresh", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "refresh token not found");
}

#[tokio::test]
async fn test_refresh_with_access_token_is_rejected() {
    let app = TestApp::new().await;
    app.register_client("ada@example.com").await;
    let (access, _) = app.login("ada@example.com", PASSWORD).await;

    let response = app
        .request_with_cookie("POST", "/api/v1/auth/refresh", &access)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid refresh token");
}

#[tokio::test]
async fn test_logout_flow() {
    let app = TestApp::new().await;
    app.register_client("ada@example.com").await;
    let (access, refresh) = app.login("ada@example.com", PASSWORD).await;

    let response = app
        .request("PATCH", "/api/v1/auth/logout", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .set_cookies
            .iter()
            .any(|c| c.starts_with("refresh_token=;") && c.contains("Max-Age=0"))
    );

    let again = app
        .request("PATCH", "/api/v1/auth/logout", None, Some(&access))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.message(), "active session not found");

    let renewed = app
        .request_with_cookie("POST", "/api/v1/auth/refresh", &refresh)
        .await;
    assert_eq!(renewed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/v1/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.message(), "access token not provided");

    let garbage = app
        .request("GET", "/api/v1/users/me", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.message(), "invalid access token");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/v1/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], json!("ok"));
}
