//! Test utilities for service handler testing.
//!
//! Provides an [`AppState`] preloaded with the fixture floor plan under
//! `docs/fixtures/`.

use std::path::PathBuf;
use std::sync::OnceLock;

use floorplan_lib::load_graph;

use crate::state::AppState;

/// Path to the fixture floor plan.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/floor_plan.json"
);

static TEST_STATE: OnceLock<AppState> = OnceLock::new();

/// Shared state loaded from the fixture floor plan.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded, which indicates a broken checkout.
pub fn test_state() -> AppState {
    TEST_STATE
        .get_or_init(|| {
            let path = fixture_path();
            let (graph, _) = load_graph(&path)
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e));
            AppState::from_graph(graph)
        })
        .clone()
}

/// Fresh state with no floor plan, resolving loads against the fixture directory.
pub fn uninitialized_state() -> AppState {
    AppState::empty(fixtures_dir())
}

pub fn fixture_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures"))
}

/// Node identifiers present in the fixture floor plan.
pub mod fixture_nodes {
    pub const ENTRANCE: &str = "entrance";
    pub const ROOM_101: &str = "room-101";
    pub const ROOM_102: &str = "room-102";
    pub const ROOM_103: &str = "room-103";
    pub const CAFETERIA: &str = "cafeteria";
    /// Has no connections.
    pub const STORAGE: &str = "storage";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path_exists() {
        let path = fixture_path();
        assert!(path.exists(), "fixture floor plan not found at {:?}", path);
    }

    #[test]
    fn test_state_contains_expected_nodes() {
        let graph = test_state().graph().unwrap();
        assert!(graph.contains(fixture_nodes::ENTRANCE));
        assert!(graph.contains(fixture_nodes::STORAGE));
        assert!(graph.neighbours(fixture_nodes::STORAGE).is_empty());
    }

    #[test]
    fn test_uninitialized_state_loads_fixture() {
        let state = uninitialized_state();
        assert!(!state.is_loaded());
        state.load_named("floor_plan.json").unwrap();
        assert!(state.is_loaded());
    }
}
