//! Health check handlers for liveness and readiness probes.
//!
//! `/health/live` always answers while the process runs. `/health/ready`
//! answers 200 only once a floor plan has been loaded.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Nodes in the active graph (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,

    /// Accepted connections in the active graph (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections_loaded: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: None,
            connections_loaded: None,
        }
    }

    /// Create a ready status with graph information.
    pub fn ready(service: &str, version: &str, nodes: usize, connections: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: Some(nodes),
            connections_loaded: Some(connections),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            nodes_loaded: None,
            connections_loaded: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"floorplan-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"...","version":"0.1.0","nodes_loaded":10,"connections_loaded":9}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let graph = match state.graph() {
        Ok(graph) => graph,
        Err(_) => {
            let status = HealthStatus::not_ready(service, version, "no floor plan loaded");
            return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
        }
    };

    if graph.is_empty() {
        let status = HealthStatus::not_ready(service, version, "floor plan has no nodes");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        graph.node_count(),
        graph.connections().len(),
    );
    (StatusCode::OK, Json(status)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_lib::{Graph, Position};

    #[test]
    fn test_health_status_alive() {
        let status = HealthStatus::alive("test-service", "1.0.0");
        assert_eq!(status.status, "ok");
        assert_eq!(status.service, "test-service");
        assert!(status.nodes_loaded.is_none());
    }

    #[test]
    fn test_health_status_serialization() {
        let status = HealthStatus::alive("route", "0.1.0");
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(!json.contains("nodes_loaded"));
    }

    #[tokio::test]
    async fn test_ready_without_floor_plan() {
        let response = health_ready(State(AppState::empty("."))).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ready_with_empty_graph() {
        let response = health_ready(State(AppState::from_graph(Graph::new()))).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ready_with_graph() {
        let mut graph = Graph::new();
        graph.add_node("A", Position::new(0.0, 0.0));
        graph.add_node("B", Position::new(3.0, 4.0));
        graph.add_edge("A", "B", 5.0, "ab");

        let response = health_ready(State(AppState::from_graph(graph))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
