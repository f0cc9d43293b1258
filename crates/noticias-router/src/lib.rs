//! Noticias Router
//!
//! REST access to the article store: list, create, retrieve, update and
//! delete single records, bulk delete, and aggregate statistics.
//!
//! # Routes
//!
//! ```text
//! GET    /noticias/                 list, newest first
//! POST   /noticias/                 create
//! GET    /noticias/:id/             retrieve
//! PUT    /noticias/:id/             replace
//! PATCH  /noticias/:id/             partial update
//! DELETE /noticias/:id/             delete
//! DELETE /noticias/limpar_tudo/     delete everything
//! GET    /noticias/estatisticas/    counts
//! GET    /health                    liveness
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::RouterConfig;
use handlers::{create_router, AppState};
use noticias_store::{SqliteStore, StoreError};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Router error
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// The database could not be opened
    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the API server
///
/// Opens the SQLite store named in the configuration and serves the
/// article routes until the process is stopped.
pub async fn start_server(config: RouterConfig) -> Result<(), RouterError> {
    // RUST_LOG overrides the default level
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    info!("Starting Noticias Router");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path.display());

    let store = SqliteStore::new(&config.database_path)?;
    let app = create_router(AppState::new(store));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Router listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| RouterError::Server(e.to_string()))?;

    Ok(())
}
