//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first when present, then the process
    /// environment is deserialized into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    #[cfg(test)]
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
    }
}
