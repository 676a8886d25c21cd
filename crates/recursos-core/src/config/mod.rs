//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! layered TOML files and `RECURSOS__*` environment variables. Each
//! sub-module represents a logical configuration section, and every
//! field carries a default so an empty configuration is valid.

pub mod app;
pub mod auth;
pub mod logging;
pub mod state;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::PortalConfig;
pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::state::StateConfig;
pub use self::storage::{DriveConfig, GcsConfig, StorageConfig, UploadProvider};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Portal behaviour (placeholder user name, initial section).
    #[serde(default)]
    pub app: PortalConfig,
    /// Persisted state location.
    #[serde(default)]
    pub state: StateConfig,
    /// Upload gateway settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Identity assertion settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `<dir>/default` with an environment-specific overlay
    /// `<dir>/<env>` and environment variables prefixed with `RECURSOS__`.
    /// Missing files are not an error.
    pub fn load(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("RECURSOS")
                    .prefix_separator("__")
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
