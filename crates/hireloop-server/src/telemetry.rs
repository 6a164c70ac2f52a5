//! Logging setup.

use hireloop_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directives used when `RUST_LOG` is unset.
#[must_use]
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!("{},hireloop=debug,tower_http=debug", config.log_level)
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_use_configured_level() {
        let config = ObservabilityConfig {
            log_level: "warn".to_string(),
            log_format: "json".to_string(),
        };
        assert_eq!(default_directives(&config), "warn,hireloop=debug,tower_http=debug");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        let config = ObservabilityConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
