//! Integration tests for registration, profile, and the professionals directory.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

fn registration(email: &str, role: &str) -> serde_json::Value {
    json!({
        "name": "Grace Hopper",
        "email": email,
        "password": PASSWORD,
        "confirm_password": PASSWORD,
        "role": role,
    })
}

#[tokio::test]
async fn test_register_client_returns_created() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/register",
            Some(registration("grace@example.com", "client")),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["role"], json!("client"));
    assert_eq!(response.data()["email"], json!("grace@example.com"));
    assert!(response.data().get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.register_client("grace@example.com").await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/register",
            Some(registration("GRACE@example.com", "client")),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_tag(), "CONFLICT_ERROR");
    assert_eq!(response.message(), "email already taken");
}

#[tokio::test]
async fn test_register_professional_requires_subcategory() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/register",
            Some(registration("pro@example.com", "professional")),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.message(),
        "professional users must have a subcategory"
    );

    let mut body = registration("pro@example.com", "professional");
    body["subcategory_id"] = json!(app.plumbing.to_string());
    let response = app
        .request("POST", "/api/v1/users/register", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.data()["subcategory_id"],
        json!(app.plumbing.to_string())
    );
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new().await;

    let mut body = registration("grace@example.com", "client");
    body["confirm_password"] = json!("Other-pass1!");
    let response = app
        .request("POST", "/api/v1/users/register", Some(body), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "passwords do not match");

    let response = app
        .request(
            "POST",
            "/api/v1/users/register",
            Some(registration("grace@example.com", "admin")),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "invalid role");

    let response = app
        .request("POST", "/api/v1/users/register", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_tag(), "BAD_REQUEST_ERROR");
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = TestApp::new().await;
    let id = app.register_client("grace@example.com").await;
    let (access, _) = app.login("grace@example.com", PASSWORD).await;

    let response = app
        .request("GET", "/api/v1/users/me", None, Some(&access))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], json!(id));
    assert_eq!(response.data()["name"], json!("Grace Hopper"));
}

#[tokio::test]
async fn test_professionals_directory() {
    let app = TestApp::new().await;
    app.register_client("client@example.com").await;
    let mut body = registration("pro@example.com", "professional");
    body["name"] = json!("Mario");
    body["subcategory_id"] = json!(app.plumbing.to_string());
    let created = app
        .request("POST", "/api/v1/users/register", Some(body), None)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let response = app
        .request("GET", "/api/v1/users/professionals", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let list = response.data().as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], json!("Mario"));
    assert_eq!(list[0]["subcategory"]["name"], json!("Plumbing"));
    assert_eq!(list[0]["category"]["name"], json!("Home"));
}
