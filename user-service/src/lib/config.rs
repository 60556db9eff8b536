use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::user::service::Deadlines;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub deadlines: DeadlinesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string. Without one the service keeps users in memory.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: String,
    pub access_token_hours: i64,
    pub refresh_token_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("access_token_hours", &self.access_token_hours)
            .field("refresh_token_hours", &self.refresh_token_hours)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeadlinesConfig {
    pub read_secs: u64,
    pub write_secs: u64,
}

impl From<&DeadlinesConfig> for Deadlines {
    fn from(config: &DeadlinesConfig) -> Self {
        Deadlines {
            read: Duration::from_secs(config.read_secs),
            write: Duration::from_secs(config.write_secs),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `PORT` and `SECRET_KEY`
    /// 2. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = Self::set_defaults(ConfigBuilder::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__").try_parsing(true))
            .set_override_option("server.http_port", env::var("PORT").ok())?
            .set_override_option("jwt.secret", env::var("SECRET_KEY").ok())?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn set_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.http_port", 8000)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.access_token_hours", 24)?
            .set_default("jwt.refresh_token_hours", 168)?
            .set_default("deadlines.read_secs", 10)?
            .set_default("deadlines.write_secs", 100)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET or SECRET_KEY)".to_string(),
            ));
        }
        if self.jwt.access_token_hours <= 0 || self.jwt.refresh_token_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt token lifetimes must be positive".to_string(),
            ));
        }
        if self.deadlines.read_secs == 0 || self.deadlines.write_secs == 0 {
            return Err(ConfigError::Message(
                "deadlines must be positive".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
