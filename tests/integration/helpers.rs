//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use servicehub_api::{AppState, build_app};
use servicehub_core::config::AppConfig;
use servicehub_core::types::id::{CategoryId, SubcategoryId};
use servicehub_database::MemoryStore;
use servicehub_entity::category::{Category, Subcategory};

const ACCESS_PEM: &str = include_str!("../../fixtures/keys/access.pem");
const REFRESH_PEM: &str = include_str!("../../fixtures/keys/refresh.pem");

/// Password that satisfies the credential policy.
pub const PASSWORD: &str = "Str0ng-pass!";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
    /// Seeded "Home" category
    pub home: CategoryId,
    /// Seeded "Plumbing" subcategory under "Home"
    pub plumbing: SubcategoryId,
    /// Seeded "Hair" subcategory under "Beauty"
    pub hair: SubcategoryId,
}

/// Status, JSON body, and refresh cookie of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Value of the refresh cookie if the response set one.
    pub refresh_cookie: Option<String>,
    /// Raw `Set-Cookie` headers.
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// The `data` member of a success body.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` tag of a failure body.
    pub fn error_tag(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    /// The `message` of a failure body.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application over an in-memory store.
    pub async fn new() -> Self {
        let config: AppConfig = serde_json::from_value(json!({
            "database": { "url": "postgres://servicehub@localhost/unused" },
            "auth": {
                "jwt_access_key": ACCESS_PEM,
                "jwt_refresh_key": REFRESH_PEM,
                "leeway_seconds": 0,
            },
            "logging": { "level": "warn", "format": "pretty" },
        }))
        .expect("Failed to build test config");

        let store = MemoryStore::new();
        let (home, plumbing, hair) = seed_categories(&store).await;

        let state = AppState::from_stores(
            config.clone(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
        .expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
            config,
            home,
            plumbing,
            hair,
        }
    }

    /// Register a client through the API and return its id.
    pub async fn register_client(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/v1/users/register",
                Some(json!({
                    "name": "Test Client",
                    "email": email,
                    "password": PASSWORD,
                    "confirm_password": PASSWORD,
                    "role": "client",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"]
            .as_str()
            .expect("registered user has an id")
            .to_string()
    }

    /// Login and return the raw response.
    pub async fn login_response(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/auth/login",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Login and return `(access_token, refresh_token)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self.login_response(email, password).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        let access = response.data()["access_token"]
            .as_str()
            .expect("access token in body")
            .to_string();
        let refresh = response.refresh_cookie.expect("refresh cookie set");
        (access, refresh)
    }

    /// Send a JSON request with an optional bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body, token, None).await
    }

    /// Send a request carrying the refresh cookie.
    pub async fn request_with_cookie(
        &self,
        method: &str,
        path: &str,
        refresh: &str,
    ) -> TestResponse {
        self.send(method, path, None, None, Some(refresh)).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        refresh: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(refresh) = refresh {
            req = req.header(COOKIE, format!("{}={refresh}", self.config.auth.cookie.name));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let prefix = format!("{}=", self.config.auth.cookie.name);
        let refresh_cookie = set_cookies
            .iter()
            .filter_map(|c| c.strip_prefix(&prefix))
            .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
            .find(|v| !v.is_empty());

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            refresh_cookie,
            set_cookies,
        }
    }
}

async fn seed_categories(store: &MemoryStore) -> (CategoryId, SubcategoryId, SubcategoryId) {
    let home = category("Home", "home");
    let beauty = category("Beauty", "beauty");
    let plumbing = subcategory("Plumbing", home.id);
    let electrical = subcategory("Electrical", home.id);
    let hair = subcategory("Hair", beauty.id);
    let ids = (home.id, plumbing.id, hair.id);

    store.add_category(home).await;
    store.add_category(beauty).await;
    store.add_subcategory(plumbing).await;
    store.add_subcategory(electrical).await;
    store.add_subcategory(hair).await;
    ids
}

fn category(name: &str, icon: &str) -> Category {
    Category {
        id: CategoryId::new(),
        name: name.to_string(),
        icon: icon.to_string(),
        created_at: Utc::now(),
        updated_at: None,
        deleted_at: None,
    }
}

fn subcategory(name: &str, category_id: CategoryId) -> Subcategory {
    Subcategory {
        id: SubcategoryId::new(),
        name: name.to_string(),
        category_id,
        created_at: Utc::now(),
        updated_at: None,
        deleted_at: None,
    }
}
