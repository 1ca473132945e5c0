//! Database connection pool and migration management.
//!
//! This module provides utilities for:
//! - Creating and managing a PostgreSQL connection pool
//! - Running database migrations automatically

use sqlx::{Pool, Postgres};

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Migrations are tracked in the `_sqlx_migrations` table, so each one runs only once.
///
/// # Migration Files
///
/// - `<timestamp>_<name>.sql` (e.g., `20250101000001_create_gift_cards.sql`)
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migrations at compile time from ./migrations directory
    sqlx::migrate!("./migrations").run(pool).await
}
