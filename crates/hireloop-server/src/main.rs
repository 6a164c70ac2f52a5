//! # Hireloop Server
//!
//! Entry point: loads configuration, connects PostgreSQL and the list cache,
//! and serves the REST API until SIGINT or SIGTERM.

use hireloop_config::{AppConfig, ConfigLoader};
use hireloop_core::{HireloopError, HireloopResult};
use hireloop_repository::create_pool;
use hireloop_rest::create_router;
use hireloop_server::app::{AppBuilder, Repositories};
use hireloop_server::{startup, telemetry};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_logging(&config.observability);
    info!("Starting Hireloop server...");

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> HireloopResult<()> {
    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let state = AppBuilder::new(config.clone())
        .with_repositories(Repositories::postgres(&db_pool))
        .with_health_check(db_pool.clone())
        .build()?;
    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HireloopError::Internal(format!("Failed to bind {addr}: {e}")))?;

    startup::print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HireloopError::Internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
