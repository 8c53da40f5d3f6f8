//! # Gents by Elegante Server
//!
//! HTTP server for the inventory and point-of-sale management application.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. tracing init                                                        │
//! │  2. load configuration from environment                                 │
//! │  3. open SQLite pool, run migrations                                    │
//! │  4. hydrate the persisted session (if any)                              │
//! │  5. ensure the default admin exists (idempotent, runs every start)      │
//! │  6. serve until ctrl-c / SIGTERM                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use elegante_db::{Database, DbConfig};
use elegante_server::config::ServerConfig;
use elegante_server::routes::build_router;
use elegante_server::session::SessionStore;
use elegante_server::{auth, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Gents by Elegante server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        "Configuration loaded"
    );

    // The data directory may not exist on first run
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Connect to the database and run migrations
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    // Hydrate the persisted session before accepting requests. The stored
    // role is not re-validated against the users table.
    let session = SessionStore::new(&config.session_file);
    session.hydrate().await;

    // Bootstrap the default admin on every start, session or not.
    let created = auth::ensure_default_admin(&db, &config.admin_password).await?;
    if created {
        info!("Default admin account created");
    }

    let state = AppState::new(db, session, config.clone());
    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
