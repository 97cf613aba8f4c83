//! HTTP server initialization and runtime setup.
//!
//! Builds the connection manager, repository and router, then either serves
//! on a local port or hands the router to the hosting platform.

use crate::config::{AppEnv, Config};
use crate::infrastructure::persistence::{ConnectionManager, PgPoolFactory, PgShortLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use std::sync::Arc;
use tower_http::normalize_path::NormalizePath;

/// Runs the service with the given configuration.
///
/// Initializes:
/// - Connection manager (the database pool itself is opened on first use)
/// - PostgreSQL repository
/// - Axum router
///
/// In [`AppEnv::Development`] a local listener is bound on `HOST:PORT`; in
/// [`AppEnv::Production`] the router runs as a platform-invoked handler.
///
/// # Errors
///
/// Returns an error if:
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let connections = Arc::new(ConnectionManager::new(Arc::new(PgPoolFactory::new(
        config.connection_settings(),
    ))));

    let repository = Arc::new(PgShortLinkRepository::new(connections.clone()));
    let state = AppState::new(repository, config.api_token.clone(), config.behind_proxy);

    let app = app_router(state);

    match config.app_env {
        AppEnv::Development => serve_local(app, &config, connections).await,
        AppEnv::Production => serve_platform(app).await,
    }
}

/// Serves on a local TCP listener until Ctrl-C or SIGTERM, then closes the
/// database pool.
async fn serve_local(
    app: NormalizePath<Router>,
    config: &Config,
    connections: Arc<ConnectionManager>,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if connections.is_connected().await {
        connections.close().await;
    } else {
        tracing::debug!("Database pool was never opened");
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Lets the hosting platform invoke the router once per request.
///
/// The process stays warm between invocations, so the cached pool is reused.
async fn serve_platform(app: NormalizePath<Router>) -> Result<()> {
    tracing::info!("Running as platform request handler");

    lambda_http::run(app)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Platform runtime failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
