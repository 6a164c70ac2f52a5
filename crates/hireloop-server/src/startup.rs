//! Startup output.

use hireloop_config::AppConfig;
use tracing::info;

/// Logs where the API can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("{} v{} ({})", config.app.name, config.app.version, config.app.environment);
    info!("REST API:  http://{}/api", addr);
    info!("Health:    http://{}/health", addr);
    info!("Ready:     http://{}/ready", addr);
    info!("API Docs:  http://{}/api-docs/openapi.json", addr);
    info!(
        "List cache: ttl={}s invalidate_on_write={} redis={}",
        config.cache.list_ttl_secs, config.cache.invalidate_on_write, config.redis.enabled
    );
    info!("{}", separator);
}
