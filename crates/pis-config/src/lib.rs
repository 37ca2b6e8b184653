//! # pis-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PIS_*` prefix, `__` as separator)
//! 2. Project-level `./pis.toml`
//! 3. User-level `~/.config/pis/config.toml`
//! 4. Built-in defaults
//!
//! `PIS_DATABASE__PATH` maps to `database.path`, `PIS_GENERAL__ACTOR` to
//! `general.actor`.
//!
//! ```no_run
//! use pis_config::PisConfig;
//!
//! let config = PisConfig::load_with_dotenv().expect("config");
//! println!("database at {}", config.database.path);
//! ```

mod database;
mod error;
mod general;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "pis.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PisConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PisConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source fails to parse and
    /// `ConfigError::InvalidValue` when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the provider chain. Public so tests can layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("PIS_").split("__"))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty database path or a
    /// zero history limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pis").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.database.path, "pis.db");
        assert_eq!(config.general.default_limit, 100);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut config = PisConfig::default();
        config.general.default_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_limit"), "{err}");
    }
}
