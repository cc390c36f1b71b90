//! HTTP server assembly: JSON API under `/api` plus the web UI at the root.

use crate::api::{self, AppState};
use crate::config::Config;
use crate::db::Database;
use crate::web;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tracing::info;

/// Build the full application router.
pub fn app(db: Database) -> Router {
    let state = AppState { db };
    Router::new()
        .nest("/api", api::router(state.clone()))
        .merge(web::router(state))
}

/// Open the database and serve until shutdown.
pub async fn run(config: &Config) -> Result<()> {
    config.ensure_db_dir()?;

    info!("Starting contextgrid v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", config.server.db_path.display());

    let db = Database::open(&config.server.db_path)?;
    let app = app(db);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
