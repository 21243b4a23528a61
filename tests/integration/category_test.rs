//! Integration tests for category listings.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_categories_with_subcategories() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/v1/categories?include=subcategories", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let list = response.data().as_array().unwrap();
    let names: Vec<_> = list.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Beauty", "Home"]);

    let home_subs: Vec<_> = list[1]["subcategories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(home_subs, ["Electrical", "Plumbing"]);
    assert!(list[1].get("subcategories_user_count").is_none());
}

#[tokio::test]
async fn test_categories_ranked_by_user_count() {
    let app = TestApp::new().await;
    let body = json!({
        "name": "Stylist",
        "email": "stylist@example.com",
        "password": PASSWORD,
        "confirm_password": PASSWORD,
        "role": "professional",
        "subcategory_id": app.hair.to_string(),
    });
    let created = app
        .request("POST", "/api/v1/users/register", Some(body), None)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let response = app.request("GET", "/api/v1/categories", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let list = response.data().as_array().unwrap();
    assert_eq!(list[0]["name"], json!("Beauty"));
    assert_eq!(list[0]["subcategories_user_count"], json!(1));
    assert_eq!(list[1]["name"], json!("Home"));
    assert_eq!(list[1]["subcategories_user_count"], json!(0));
    assert!(list[0].get("subcategories").is_none());
}
