//! User Registry - A small user-registration service
//!
//! Registers users through a write-through in-memory cache in front of an
//! SQLite store, and lists them back without credentials.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_registry::api::create_router;
use user_registry::{AppState, Config, SqliteUserStore, UserStore};

/// Main entry point for the registration server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the SQLite pool and create the users table
/// 4. Build the registration coordinator, optionally warming its cache
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM, then close the pool
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_registry=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting User Registry Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: database_url={}, max_connections={}, port={}, warm_cache={}",
        config.database_url, config.max_connections, config.server_port, config.warm_cache
    );

    let store = SqliteUserStore::connect(&config.database_url, config.max_connections)
        .await
        .context("failed to open user store")?;
    store
        .ensure_schema()
        .await
        .context("failed to create users table")?;
    let store = Arc::new(store);

    let state = AppState::from_store(store.clone());
    if config.warm_cache {
        let loaded = state
            .coordinator
            .warm_cache()
            .await
            .context("failed to warm user cache")?;
        info!("Cache warmed with {} stored users", loaded);
    } else {
        warn!("Cache warming disabled; duplicates of pre-existing users rely on the store constraint");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
