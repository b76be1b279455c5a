//! Configuration for the Catalog API

use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, read once at process start
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            postgres,
            server,
            environment,
        })
    }
}
