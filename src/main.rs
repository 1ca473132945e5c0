//! Admin Commerce Service - Main Application Entry Point
//!
//! A REST API for platform administrators: gift card issuance and lifecycle
//! management, wallet summaries over payments, withdrawals and gift cards,
//! and moderation configuration.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Format**: JSON requests/responses
//!
//! Authentication is expected to happen at the gateway in front of this service.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod clock;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{clock::SystemClock, state::AppState, store::PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "Database pool created"
    );

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let state = AppState::new(Arc::new(PgStore::new(pool)), Arc::new(SystemClock));
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
