//! Application builder: wires router, middleware, and state into an Axum app,
//! and serves it until a shutdown signal arrives.

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use servicehub_core::config::ServerConfig;
use servicehub_core::error::{AppError, ErrorKind};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
}

/// Binds the configured address and serves `app` until Ctrl-C or SIGTERM.
///
/// In-flight requests are drained for at most `shutdown_timeout_seconds`.
pub async fn serve(app: Router, config: &ServerConfig) -> Result<(), AppError> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(address = %addr, "ServiceHub server listening");

    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, draining in-flight requests");
        let _ = signalled_tx.send(());
    });
    let server = tokio::spawn(async move { server.await });

    let drain = Duration::from_secs(config.shutdown_timeout_seconds);
    let outcome = async {
        match server.await {
            Ok(result) => result.map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Server error", e)
            }),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Internal,
                "Server task failed",
                e,
            )),
        }
    };
    tokio::pin!(outcome);

    tokio::select! {
        result = &mut outcome => return result,
        _ = signalled_rx => {}
    }

    match tokio::time::timeout(drain, outcome).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_secs = drain.as_secs(), "Graceful shutdown timed out, aborting");
            Ok(())
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
