//! Route definitions for the ServiceHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api/v1`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API routes without middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(category_routes())
        .merge(health_routes());

    Router::new().nest("/api/v1", api_routes).with_state(state)
}

/// Auth endpoints: login, logout, refresh
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", patch(handlers::auth::logout))
        .route("/auth/refresh", post(handlers::auth::refresh))
}

/// Registration, own profile, professionals directory
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(handlers::user::register))
        .route("/users/me", get(handlers::user::get_profile))
        .route("/users/professionals", get(handlers::user::list_professionals))
}

/// Category catalog
fn category_routes() -> Router<AppState> {
    Router::new().route("/categories", get(handlers::category::list_categories))
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
