//! Prometheus metrics for the floor-plan services.
//!
//! HTTP request metrics are recorded by [`crate::middleware::MetricsLayer`];
//! this module owns the recorder, the `/metrics` handler and the business
//! metric helpers.
//!
//! ```no_run
//! use floorplan_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from `METRICS_ENABLED` and `METRICS_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let path = lookup("METRICS_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder.
///
/// Must be called once at startup before any metric is recorded.
///
/// # Errors
///
/// Returns an error when metrics are disabled, when a recorder is already
/// installed, or when the Prometheus builder fails.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint in Prometheus exposition format.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increment `floorplan_routes_calculated_total`.
///
/// * `heuristic` - heuristic the search ran with (e.g. "euclidean")
/// * `endpoint` - endpoint that served the request (e.g. "route", "path")
pub fn record_route_calculated(heuristic: &str, endpoint: &str) {
    metrics::counter!(
        "floorplan_routes_calculated_total",
        "heuristic" => heuristic.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Increment `floorplan_routes_failed_total`.
///
/// `reason` is one of the labels produced by [`crate::failure_reason`] or
/// `"validation_error"`.
pub fn record_route_failed(reason: &str, endpoint: &str) {
    metrics::counter!(
        "floorplan_routes_failed_total",
        "reason" => reason.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// Record the number of line segments in a successful route.
pub fn record_route_segments(segments: usize, heuristic: &str) {
    metrics::histogram!(
        "floorplan_route_segments",
        "heuristic" => heuristic.to_string()
    )
    .record(segments as f64);
}

/// Publish the size of a freshly loaded graph and count the load.
pub fn record_floor_plan_loaded(nodes: usize, connections: usize) {
    metrics::gauge!("floorplan_graph_nodes").set(nodes as f64);
    metrics::gauge!("floorplan_graph_edges").set(connections as f64);
    metrics::counter!("floorplan_loads_total").increment(1);
}
