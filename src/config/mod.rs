//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `COUNTER_DESK`
//! prefix and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use counter_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod backend;
mod error;
mod realtime;
mod storage;

pub use backend::BackendConfig;
pub use error::{ConfigError, ValidationError};
pub use realtime::RealtimeConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Queue backend REST API.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Realtime push channel and reconnect policy.
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// Local snapshot storage.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file when present, then reads variables with the
    /// `COUNTER_DESK` prefix; `COUNTER_DESK__BACKEND__BASE_URL` maps to
    /// `backend.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COUNTER_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.backend.validate()?;
        self.realtime.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
