//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use servicehub_auth::jwt::{JwtDecoder, JwtEncoder, TokenKeys};
use servicehub_auth::password::{CredentialValidator, PasswordHasher};
use servicehub_auth::session::SessionManager;
use servicehub_core::config::AppConfig;
use servicehub_core::result::AppResult;
use servicehub_database::store::{CategoryStore, SessionStore, UserStore};
use servicehub_service::{AuthService, CategoryService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Login, logout, renewal, and bearer verification
    pub auth_service: Arc<AuthService>,
    /// Registration and user reads
    pub user_service: Arc<UserService>,
    /// Category listings
    pub category_service: Arc<CategoryService>,
}

impl AppState {
    /// Wires the auth primitives and services over the given stores.
    ///
    /// Fails with `Configuration` if the signing keys are unusable.
    pub fn from_stores(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        categories: Arc<dyn CategoryStore>,
    ) -> AppResult<Self> {
        let keys = TokenKeys::from_config(&config.auth)?;

        let validator = Arc::new(CredentialValidator::new());
        let hasher = Arc::new(PasswordHasher::new());
        let encoder = Arc::new(JwtEncoder::new(config.auth.issuer.clone()));
        let decoder = Arc::new(JwtDecoder::new(
            &config.auth.issuer,
            config.auth.leeway_seconds,
        ));
        let session_manager = Arc::new(SessionManager::new(sessions, &config.session));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            session_manager,
            Arc::clone(&validator),
            Arc::clone(&hasher),
            encoder,
            decoder,
            keys,
            &config.auth,
        ));
        let user_service = Arc::new(UserService::new(
            users,
            Arc::clone(&categories),
            validator,
            hasher,
        ));
        let category_service = Arc::new(CategoryService::new(categories));

        Ok(Self {
            config: Arc::new(config),
            auth_service,
            user_service,
            category_service,
        })
    }
}
