//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use clientele_core::ClienteleError;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable selecting the environment-specific overlay file.
pub const ENVIRONMENT_VAR: &str = "CLIENTELE_ENVIRONMENT";

/// Prefix for environment variable overrides (`CLIENTELE__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "CLIENTELE";

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with `CLIENTELE__` prefix
    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self, ClienteleError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ClienteleError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    fn load_config(config_dir: &Path) -> Result<AppConfig, ClienteleError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_clientele_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), ClienteleError> {
        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            ClienteleError::Configuration(message)
        })
    }
}

fn config_error_to_clientele_error(err: ConfigError) -> ClienteleError {
    ClienteleError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_loads_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [server]
            port = 9000

            [cache]
            ttl_secs = 5
            "#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        let config = loader.get();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.ttl_secs, 5);
        assert_eq!(config.monitor.database_interval_secs, 30);
    }

    #[test]
    fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 9000\n").unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nport = 9100\n").unwrap();

        let config = ConfigLoader::new(dir.path()).unwrap().get();
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::new(dir.path().join("absent")).unwrap().get();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\nurl = \"redis://localhost\"\n",
        )
        .unwrap();

        let result = ConfigLoader::new(dir.path());
        assert!(matches!(result, Err(ClienteleError::Configuration(_))));
    }
}
