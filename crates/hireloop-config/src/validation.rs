//! Configuration validation.
//!
//! Every problem is collected before failing, so one start attempt reports
//! all of them.

use crate::AppConfig;
use thiserror::Error;
use url::Url;

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Invalid {url_type} URL: {message}")]
    InvalidUrl { url_type: &'static str, message: String },

    #[error("Invalid port for {name}: {value} (must be 1-65535)")]
    InvalidPort { name: &'static str, value: u16 },

    #[error("Invalid pool size: min ({min}) cannot be greater than max ({max})")]
    InvalidPoolSize { min: u32, max: u32 },

    #[error("'{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: u64 },

    #[error("pagination.default_limit ({default_limit}) must be between 1 and max_limit ({max_limit})")]
    InvalidPageLimits { default_limit: u64, max_limit: u64 },

    #[error("JWT secret too short: {actual} characters (minimum {minimum})")]
    JwtSecretTooShort { actual: usize, minimum: usize },

    #[error("Invalid log level: '{0}' (valid: trace, debug, info, warn, error)")]
    InvalidLogLevel(String),

    #[error("Invalid log format: '{0}' (valid: json, pretty)")]
    InvalidLogFormat(String),
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Only enforced in production, where the default secret is unacceptable.
    const MIN_JWT_SECRET_LENGTH: usize = 32;
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_redis(config, &mut errors);
        Self::validate_security(config, &mut errors);
        Self::validate_lists(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port",
                value: 0,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "server.request_timeout_secs",
                value: 0,
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let db = &config.database;
        match Url::parse(&db.url) {
            Ok(url) if matches!(url.scheme(), "postgres" | "postgresql") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database",
                message: format!("unsupported scheme '{}', expected postgres://", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database",
                message: e.to_string(),
            }),
        }

        if db.min_connections > db.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: db.min_connections,
                max: db.max_connections,
            });
        }
        if db.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "database.connect_timeout_secs",
                value: 0,
            });
        }
    }

    fn validate_redis(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.redis.enabled {
            return;
        }
        match Url::parse(&config.redis.url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(_) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis",
                message: "URL must start with redis:// or rediss://".to_string(),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis",
                message: e.to_string(),
            }),
        }
        if config.redis.pool_size == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "redis.pool_size",
                value: 0,
            });
        }
    }

    fn validate_security(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.app.is_production() && config.security.jwt_secret.len() < Self::MIN_JWT_SECRET_LENGTH {
            errors.push(ConfigValidationError::JwtSecretTooShort {
                actual: config.security.jwt_secret.len(),
                minimum: Self::MIN_JWT_SECRET_LENGTH,
            });
        }
        if config.security.jwt_expiration_secs == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "security.jwt_expiration_secs",
                value: 0,
            });
        }
    }

    fn validate_lists(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let paging = config.pagination;
        if paging.default_limit == 0 || paging.default_limit > paging.max_limit {
            errors.push(ConfigValidationError::InvalidPageLimits {
                default_limit: paging.default_limit,
                max_limit: paging.max_limit,
            });
        }
        if config.cache.list_ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "cache.list_ttl_secs",
                value: 0,
            });
        }
        if config.cache.max_entries == 0 {
            errors.push(ConfigValidationError::NonPositive {
                name: "cache.max_entries",
                value: 0,
            });
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel(
                config.observability.log_level.clone(),
            ));
        }
        let format = config.observability.log_format.to_lowercase();
        if format != "json" && format != "pretty" {
            errors.push(ConfigValidationError::InvalidLogFormat(
                config.observability.log_format.clone(),
            ));
        }
    }
}
