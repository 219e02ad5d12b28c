//! Configuration management for the devlock server
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `DEVLOCK_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;

/// Deployment mode controlling how much error detail reaches clients.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Development,
    #[default]
    Production,
}

impl DeploymentMode {
    pub fn is_development(self) -> bool {
        self == DeploymentMode::Development
    }
}

/// Complete server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// HTTP listen port
    /// Environment: DEVLOCK_PORT
    pub port: u16,

    /// Account store connection string (`sqlite://path`, a bare path, or `:memory:`)
    /// Environment: DEVLOCK_DATABASE_URL
    pub database_url: String,

    /// Environment: DEVLOCK_ENVIRONMENT
    pub environment: DeploymentMode,

    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "sqlite://devlock.db".to_string(),
            environment: DeploymentMode::Production,
            max_body_bytes: 100 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `config_path` (extension optional) as the file layer
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = ServerConfig::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", defaults.database_url)?
            .set_default("environment", "production")?
            .set_default("max_body_bytes", defaults.max_body_bytes as i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("DEVLOCK"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.database_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "database_url cannot be empty".into(),
            ));
        }

        if self.max_body_bytes == 0 {
            return Err(config::ConfigError::Message(
                "max_body_bytes must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
