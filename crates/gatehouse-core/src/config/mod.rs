//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod cache;
pub mod credentials;
pub mod logging;
pub mod registry;
pub mod session;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::credentials::CredentialsConfig;
use self::logging::LoggingConfig;
use self::registry::RegistryConfig;
use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Cache provider settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Session materialization settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Server-held downstream credential settings.
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `GATEHOUSE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GATEHOUSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            cache: CacheConfig::default(),
            session: SessionConfig::default(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
