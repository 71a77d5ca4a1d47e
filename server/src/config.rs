//! Process configuration read from environment variables.
//!
//! - PORT: listening port (default 5000)
//! - APP_ENV: "development" | "production" | "test" (default production)
//! - STORE_BACKEND: "postgres" | "memory" (default postgres)
//! - DATABASE_URL: required for the postgres backend
//! - CORS_ORIGINS: comma-separated allowed origins (default: any)

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT: {0}")]
    InvalidPort(String),

    #[error("Unknown APP_ENV: {0}")]
    UnknownMode(String),

    #[error("Unknown STORE_BACKEND: {0}")]
    UnknownBackend(String),

    #[error("DATABASE_URL must be set when STORE_BACKEND=postgres")]
    MissingDatabaseUrl,
}

/// Runtime mode. Error responses include a trace only in development.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
    Test,
}

impl RuntimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::Development => "development",
            RuntimeMode::Production => "production",
            RuntimeMode::Test => "test",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(RuntimeMode::Development),
            "production" | "prod" => Some(RuntimeMode::Production),
            "test" => Some(RuntimeMode::Test),
            _ => None,
        }
    }

    pub fn exposes_traces(&self) -> bool {
        matches!(self, RuntimeMode::Development)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub mode: RuntimeMode,
    pub store: StoreBackend,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let mode = match lookup("APP_ENV") {
            Some(raw) => RuntimeMode::from_str(&raw).ok_or(ConfigError::UnknownMode(raw))?,
            None => RuntimeMode::default(),
        };

        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let backend_name = backend.trim().to_lowercase();
        let store = match backend_name.as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
            },
            "memory" => StoreBackend::Memory,
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            port,
            mode,
            store,
            cors_origins,
        })
    }
}
