use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Holder for the currently active floor-plan graph.
///
/// Searches take an `Arc<Graph>` snapshot and run without holding the lock.
/// [`GraphStore::replace`] swaps the whole graph at once, so a search started
/// before a reload finishes against the graph it started with.
#[derive(Debug, Default)]
pub struct GraphStore {
    current: RwLock<Option<Arc<Graph>>>,
}

impl GraphStore {
    /// Store with no graph loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(graph: Graph) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(graph))),
        }
    }

    /// Snapshot of the active graph.
    pub fn snapshot(&self) -> Result<Arc<Graph>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::GraphUninitialized)
    }

    /// Install `graph` as the active graph, returning the previous one.
    pub fn replace(&self, graph: Graph) -> Option<Arc<Graph>> {
        let next = Arc::new(graph);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.replace(next)
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
