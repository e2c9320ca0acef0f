//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::constants::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MIN_CONNECTIONS, DEFAULT_POOL_SIZE};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "tenantry-server")?
            .set_default("database.max_connections", DEFAULT_POOL_SIZE)?
            .set_default("database.min_connections", DEFAULT_MIN_CONNECTIONS)?
            .set_default("database.acquire_timeout_secs", DEFAULT_ACQUIRE_TIMEOUT_SECS)
    }

    /// Pool sizing is fixed for the life of the process, so reject
    /// settings the pool could never satisfy.
    pub fn validate(&self) -> Result<(), AppError> {
        let db = &self.database;
        if db.url.trim().is_empty() {
            return Err(AppError::InvalidConfig("database.url must be set".into()));
        }
        if db.max_connections == 0 {
            return Err(AppError::InvalidConfig(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if db.min_connections > db.max_connections {
            return Err(AppError::InvalidConfig(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                db.min_connections, db.max_connections
            )));
        }
        if db.acquire_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "database.acquire_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
