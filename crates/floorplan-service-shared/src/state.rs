//! Application state for HTTP services.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the active floor-plan graph and to swap in a new one.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use floorplan_lib::{load_graph, BuildReport, Error as LibError, Graph, GraphStore};

use crate::config::ServiceConfig;
use crate::metrics::record_floor_plan_loaded;

/// Error during application state initialization or floor-plan loading.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load or build the floor plan.
    FloorPlanLoad(LibError),

    /// The requested floor-plan file name escapes the configured directory.
    InvalidFloorPlanPath(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FloorPlanLoad(e) => write!(f, "failed to load floor plan: {}", e),
            Self::InvalidFloorPlanPath(path) => {
                write!(f, "floor plan path must be relative to the data directory: {}", path)
            }
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FloorPlanLoad(e) => Some(e),
            Self::InvalidFloorPlanPath(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::FloorPlanLoad(err)
    }
}

/// Outcome of loading a floor plan into the state.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    /// File the graph was built from.
    pub source: String,
    #[serde(flatten)]
    pub report: BuildReport,
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The graph itself lives in a
/// [`GraphStore`]; handlers take a snapshot per request so a concurrent reload
/// never changes the graph under an in-flight search.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use floorplan_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let graph = state.graph().expect("floor plan loaded");
///     // ... use graph
/// }
///
/// let state = AppState::from_graph(graph);
/// let app = Router::new()
///     .route("/api/v1/route", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: GraphStore,
    floor_plan_dir: PathBuf,
    search_timeout: Option<Duration>,
}

impl AppState {
    /// Create state around an existing store.
    pub fn new(store: GraphStore, floor_plan_dir: PathBuf, search_timeout: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                floor_plan_dir,
                search_timeout,
            }),
        }
    }

    /// Create state from service configuration.
    ///
    /// When `FLOOR_PLAN_PATH` is configured the floor plan is loaded eagerly and
    /// any failure is returned. Otherwise the state starts without a graph and
    /// route queries fail until a floor plan is loaded.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let state = Self::new(
            GraphStore::new(),
            config.floor_plan_dir.clone(),
            config.search_timeout,
        );

        match &config.floor_plan_path {
            Some(path) => {
                state.load_path(path)?;
            }
            None => {
                tracing::warn!("FLOOR_PLAN_PATH not set; waiting for /floorplan/load");
            }
        }

        Ok(state)
    }

    /// Create state with an already built graph.
    ///
    /// This is useful for testing or when the graph is built in-process.
    pub fn from_graph(graph: Graph) -> Self {
        Self::new(GraphStore::with_graph(graph), PathBuf::from("."), None)
    }

    /// Create state with no graph loaded.
    pub fn empty(floor_plan_dir: impl Into<PathBuf>) -> Self {
        Self::new(GraphStore::new(), floor_plan_dir.into(), None)
    }

    /// Snapshot of the active graph.
    pub fn graph(&self) -> Result<Arc<Graph>, LibError> {
        self.inner.store.snapshot()
    }

    /// Whether a floor plan has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.inner.store.is_loaded()
    }

    /// Per-request search deadline, if configured.
    pub fn search_timeout(&self) -> Option<Duration> {
        self.inner.search_timeout
    }

    /// Directory that relative floor-plan names resolve against.
    pub fn floor_plan_dir(&self) -> &Path {
        &self.inner.floor_plan_dir
    }

    /// Load the floor plan at `path`, build it, and make it the active graph.
    ///
    /// On failure the previously active graph stays in place.
    pub fn load_path(&self, path: &Path) -> Result<LoadSummary, AppStateError> {
        tracing::info!(path = %path.display(), "loading floor plan");
        let (graph, report) = load_graph(path)?;
        self.inner.store.replace(graph);

        record_floor_plan_loaded(report.nodes, report.connections);
        tracing::info!(
            path = %path.display(),
            nodes = report.nodes,
            connections = report.connections,
            "floor plan loaded successfully"
        );

        Ok(LoadSummary {
            source: path.display().to_string(),
            report,
        })
    }

    /// Load a floor plan named relative to [`AppState::floor_plan_dir`].
    pub fn load_named(&self, file: &str) -> Result<LoadSummary, AppStateError> {
        let path = self.resolve_floor_plan(file)?;
        self.load_path(&path)
    }

    /// Resolve a client-supplied file name inside the floor-plan directory.
    ///
    /// Only plain relative names are accepted; absolute paths and parent
    /// directory components are rejected.
    pub fn resolve_floor_plan(&self, file: &str) -> Result<PathBuf, AppStateError> {
        let relative = Path::new(file);
        let plain = !file.trim().is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !plain {
            return Err(AppStateError::InvalidFloorPlanPath(file.to_string()));
        }
        Ok(self.inner.floor_plan_dir.join(relative))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nodes = self.graph().map(|graph| graph.node_count()).ok();
        f.debug_struct("AppState")
            .field("loaded", &nodes.is_some())
            .field("node_count", &nodes)
            .field("floor_plan_dir", &self.inner.floor_plan_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_lib::Position;
    use std::fs;

    fn minimal_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node("A", Position::new(0.0, 0.0));
        graph.add_node("B", Position::new(1.0, 0.0));
        graph.add_edge("A", "B", 1.0, "L1");
        graph
    }

    const TINY_PLAN: &str = r#"{
        "objects": {"A": {"position": {"x": 0, "y": 0}}, "B": {"position": {"x": 2, "y": 0}}},
        "graph": {"edges": [{"from": "A", "to": "B", "weight": 2, "line_id": "tiny"}]}
    }"#;

    #[test]
    fn test_app_state_from_graph() {
        let state = AppState::from_graph(minimal_graph());
        assert!(state.is_loaded());
        assert_eq!(state.graph().unwrap().node_count(), 2);
    }

    #[test]
    fn test_empty_state_is_uninitialized() {
        let state = AppState::empty(".");
        assert!(!state.is_loaded());
        assert!(matches!(state.graph(), Err(LibError::GraphUninitialized)));
    }

    #[test]
    fn test_app_state_clone_shares_store() {
        let state1 = AppState::empty(".");
        let state2 = state1.clone();

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tiny.json");
        fs::write(&path, TINY_PLAN).unwrap();
        state1.load_path(&path).unwrap();

        assert!(state2.is_loaded());
    }

    #[test]
    fn test_load_named_resolves_inside_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("tiny.json"), TINY_PLAN).unwrap();
        let state = AppState::empty(temp.path());

        let summary = state.load_named("tiny.json").unwrap();
        assert_eq!(summary.report.nodes, 2);
        assert_eq!(summary.report.connections, 1);
        assert!(summary.source.ends_with("tiny.json"));
    }

    #[test]
    fn test_resolve_rejects_escaping_paths() {
        let state = AppState::empty("/srv/plans");
        for bad in ["../secret.json", "/etc/passwd", "a/../../b.json", "", "./plan.json"] {
            assert!(
                matches!(
                    state.resolve_floor_plan(bad),
                    Err(AppStateError::InvalidFloorPlanPath(_))
                ),
                "{bad} should be rejected"
            );
        }
        assert_eq!(
            state.resolve_floor_plan("floors/first.json").unwrap(),
            PathBuf::from("/srv/plans/floors/first.json")
        );
    }

    #[test]
    fn test_failed_load_keeps_previous_graph() {
        let state = AppState::from_graph(minimal_graph());
        let err = state
            .load_path(Path::new("/nonexistent/floor_plan.json"))
            .unwrap_err();

        assert!(matches!(
            err,
            AppStateError::FloorPlanLoad(LibError::FloorPlanNotFound { .. })
        ));
        assert_eq!(state.graph().unwrap().node_count(), 2);
    }

    #[test]
    fn test_from_config_without_path_starts_empty() {
        let config = ServiceConfig::default();
        let state = AppState::from_config(&config).unwrap();
        assert!(!state.is_loaded());
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_graph(minimal_graph());
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("node_count"));
    }
}
