//! Application settings loaded from environment variables.

use std::env;

use super::constants::DEFAULT_DATABASE_URL;

/// Application configuration.
///
/// Server host and port are CLI concerns (clap reads them from args or
/// environment); only the database connection lives here.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from the environment, reading `.env` if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        }
    }
}
