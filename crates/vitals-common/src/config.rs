//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > config file > defaults

use serde::Deserialize;
use std::path::Path;

/// Load the application configuration.
///
/// `path` names an explicit config file (required to exist). Without it, an
/// optional `config.toml` in the working directory is read if present.
pub fn load(path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    load_with_env(path, environment())
}

/// Environment variables (VITALS__SERVER__PORT, VITALS__DATABASE__URL, etc.)
fn environment() -> config::Environment {
    config::Environment::with_prefix("VITALS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<AppConfig, config::ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let cfg = config::Config::builder()
        // Defaults
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.max_connections", 10)?
        .set_default("database.min_connections", 0)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("log.format", "pretty")?
        .add_source(file)
        .add_source(env)
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

impl AppConfig {
    fn validate(&self) -> Result<(), config::ConfigError> {
        let db = &self.database;
        if db.max_connections == 0 {
            return Err(config::ConfigError::Message(
                "database.max_connections must be greater than zero".into(),
            ));
        }
        if db.min_connections > db.max_connections {
            return Err(config::ConfigError::Message(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                db.min_connections, db.max_connections
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long readiness waits for a pooled connection before giving up.
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}
