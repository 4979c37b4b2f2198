//! # tk-config
//!
//! Layered configuration loading for tk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TK_*` prefix, `__` as separator)
//! 2. Project-level `.tk/config.toml`
//! 3. User-level `~/.config/tk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TK_DATABASE__PATH` -> `database.path`,
//! `TK_PUBLISH__MAX_ATTEMPTS` -> `publish.max_attempts`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tk_config::TkConfig;
//!
//! let config = TkConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod publish;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use publish::PublishConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TkConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TkConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tk/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TK_").split("__"))
    }

    /// Reject values that would make the store misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.publish.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "publish.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.publish.retry_max_delay_ms < self.publish.retry_base_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "publish.retry_max_delay_ms".into(),
                reason: "must not be lower than publish.retry_base_delay_ms".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tk").join("config.toml"))
    }
}
