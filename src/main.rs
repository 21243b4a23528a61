//! ServiceHub Server: user registration, authentication, and category catalog.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use servicehub_api::{AppState, build_app, serve};
use servicehub_core::config::AppConfig;
use servicehub_core::error::AppError;
use servicehub_database::DatabasePool;
use servicehub_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("SERVICEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ServiceHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::connect(&config.database).await?;
    db_pool.health_check().await?;
    run_migrations(db_pool.pool()).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let (user_repo, session_repo, category_repo) = db_pool.repositories(&config.database);

    // ── Step 3: Auth primitives and services ─────────────────────
    let server_config = config.server.clone();
    let state = AppState::from_stores(
        config,
        Arc::new(user_repo),
        Arc::new(session_repo),
        Arc::new(category_repo),
    )?;
    tracing::info!("Services initialized");

    // ── Step 4: Serve until shutdown ─────────────────────────────
    let app = build_app(state);
    let result = serve(app, &server_config).await;

    // ── Step 5: Release the pool ─────────────────────────────────
    db_pool.close().await;
    tracing::info!("ServiceHub server shut down");
    result
}
