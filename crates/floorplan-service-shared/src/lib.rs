//! Shared infrastructure for floor-plan routing HTTP services.
//!
//! This crate provides common functionality used by the service binaries:
//!
//! - [`AppState`]: Reloadable floor-plan graph shared by all handlers
//! - [`ServiceConfig`]: Environment-driven service configuration
//! - [`health`]: Health check handlers for liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: Wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking, metrics and CORS layers
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! The services follow a thin-handler pattern where all routing logic resides
//! in `floorplan-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON / query                               │
//! │  - Validate parameters                                      │
//! │  - Call floorplan-lib APIs on a graph snapshot              │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixture-backed state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_floor_plan_loaded, record_route_calculated,
    record_route_failed, record_route_segments, MetricsConfig, MetricsError,
};
pub use middleware::{cors_layer, extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    failure_reason, from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_FLOOR_PLAN, PROBLEM_INVALID_REQUEST, PROBLEM_ROUTE_NOT_FOUND,
    PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UNKNOWN_NODE,
};
pub use request::{LoadFloorPlanQuery, PathQuery, RouteRequest, Validate};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError, LoadSummary};
