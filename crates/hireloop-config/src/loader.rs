//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use hireloop_core::HireloopError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable selecting the `{environment}.toml` overlay.
pub const ENVIRONMENT_VAR: &str = "HIRELOOP_ENVIRONMENT";

/// Loads [`AppConfig`] from a config directory.
///
/// Sources, later ones winning:
/// 1. `{dir}/default.toml`
/// 2. `{dir}/{environment}.toml`
/// 3. `{dir}/local.toml` (not committed)
/// 4. `HIRELOOP__SECTION__KEY` environment variables
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: String,
}

impl ConfigLoader {
    /// Creates a loader for `config_dir`, reading the environment name from
    /// `HIRELOOP_ENVIRONMENT` (default `development`). A `.env` file is
    /// loaded first if present.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }
        let environment = std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader with an explicit environment name.
    pub fn with_environment(config_dir: impl Into<PathBuf>, environment: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            environment: environment.into(),
        }
    }

    /// Loader for `./config`.
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Builds, deserializes and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, HireloopError> {
        info!(
            "Loading configuration for environment: {} from {}",
            self.environment,
            self.config_dir.display()
        );

        let mut builder = Config::builder();
        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("HIRELOOP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        let mut app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_hireloop_error)?;

        // The overlay name wins over whatever the files say.
        app_config.app.environment.clone_from(&self.environment);

        Self::validate_config(&app_config)?;
        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), HireloopError> {
        if config.app.is_production() && config.security.jwt_secret == "change-me-in-production" {
            warn!("Using default JWT secret in production! This is a security risk.");
        }

        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
            HireloopError::Configuration(message)
        })
    }

    /// The directory this loader reads from.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

fn config_error_to_hireloop_error(err: ConfigError) -> HireloopError {
    HireloopError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::with_environment(dir.path().join("absent"), "test")
            .load()
            .unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.app.environment, "test");
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[cache]\nlist_ttl_secs = 60\n[pagination]\nmax_limit = 100\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.toml"), "[cache]\nlist_ttl_secs = 15\n").unwrap();

        let config = ConfigLoader::with_environment(dir.path(), "staging").load().unwrap();
        assert_eq!(config.cache.list_ttl_secs, 15);
        assert_eq!(config.pagination.max_limit, 100);
    }

    #[test]
    fn test_local_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 4000\n").unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nport = 4100\n").unwrap();

        let config = ConfigLoader::with_environment(dir.path(), "development").load().unwrap();
        assert_eq!(config.server.port, 4100);
    }

    #[test]
    fn test_invalid_values_fail_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[pagination]\ndefault_limit = 0\n").unwrap();

        let err = ConfigLoader::with_environment(dir.path(), "development").load().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.to_string().contains("default_limit"));
    }
}
