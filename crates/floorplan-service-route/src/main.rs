//! Floor-plan route planning HTTP service binary.
//!
//! # Configuration
//!
//! - `FLOOR_PLAN_PATH` - Floor plan loaded at startup (optional)
//! - `FLOOR_PLAN_DIR` - Directory `/floorplan/load` reads from (default: `.`)
//! - `SERVER_ADDRESS` - Listen address, `host:port` or `:port` (default: `0.0.0.0:8080`)
//! - `SEARCH_TIMEOUT_MS` - Per-request search deadline (optional)
//! - `CORS_ALLOW_ORIGIN` - Allowed CORS origin (default: `*`)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use tracing::{error, info, warn};

use floorplan_service_route::app;
use floorplan_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("floorplan-route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().inspect_err(|e| {
        error!(error = %e, "invalid service configuration");
    })?;

    info!(
        address = %config.address,
        floor_plan = ?config.floor_plan_path,
        floor_plan_dir = %config.floor_plan_dir.display(),
        "starting floor-plan route service"
    );

    let state = AppState::from_config(&config).inspect_err(|e| {
        error!(error = %e, "failed to load application state");
    })?;

    let router = app(state, &config, &metrics_config);

    let listener = tokio::net::TcpListener::bind(config.address).await?;
    info!(addr = %config.address, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
