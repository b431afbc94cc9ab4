use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Epoch used by the snowflake generator when none is configured.
pub const DEFAULT_SNOWFLAKE_START_TIME: &str = "2024-01-01 00:00:00";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub database_max_connections: u32,
    /// Custom snowflake epoch, formatted `YYYY-MM-DD HH:MM:SS` (UTC)
    pub snowflake_start_time: String,
    /// Snowflake machine ID (0-1023), unique per running instance
    pub snowflake_machine_id: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            snowflake_start_time: env::var("SNOWFLAKE_START_TIME")
                .unwrap_or_else(|_| DEFAULT_SNOWFLAKE_START_TIME.to_string()),
            snowflake_machine_id: env::var("SNOWFLAKE_MACHINE_ID")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("SNOWFLAKE_MACHINE_ID must be a valid number")?,
        })
    }
}
