use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

/// PostgreSQL database configuration
///
/// Holds the connection string and pool settings. Construct manually or
/// load from environment variables once at process start.
///
/// # Example
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::PostgresConfig;
///
/// let config = PostgresConfig::from_env()?;
/// let options = config.into_connect_options();
/// ```
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    /// Create a new PostgresConfig with default pool settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 100,
            min_connections: 5,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            sqlx_logging: true,
        }
    }

    /// Convert this config into SeaORM ConnectOptions
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Info);
        opt
    }

    /// Get a reference to the database URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Load PostgresConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` (required) - PostgreSQL connection string
/// - `DB_MAX_CONNECTIONS` (optional, default: 100)
/// - `DB_MIN_CONNECTIONS` (optional, default: 5)
/// - `DB_CONNECT_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_SQLX_LOGGING` (optional, default: true)
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;

        let max_connections = env_or_default("DB_MAX_CONNECTIONS", "100")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DB_MAX_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;

        let min_connections = env_or_default("DB_MIN_CONNECTIONS", "5")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DB_MIN_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;

        let connect_timeout_secs = env_or_default("DB_CONNECT_TIMEOUT_SECS", "8")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DB_CONNECT_TIMEOUT_SECS".to_string(),
                details: format!("{}", e),
            })?;

        let sqlx_logging = env_or_default("DB_SQLX_LOGGING", "true")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DB_SQLX_LOGGING".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            connect_timeout_secs,
            acquire_timeout_secs: connect_timeout_secs,
            sqlx_logging,
        })
    }
}
