use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::graph::Graph;
use crate::search::{find_path_with, CancelFlag, Heuristic, SearchOptions};

/// High-level route planning request.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub heuristic: Heuristic,
    /// Upper bound on search time.
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelFlag>,
}

impl RouteRequest {
    /// Convenience constructor using the Euclidean heuristic and no limits.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: String,
    pub goal: String,
    pub heuristic: Heuristic,
    /// Node identifiers from start to goal.
    pub nodes: Vec<String>,
    /// Map segments to highlight, in travel order.
    pub line_ids: Vec<String>,
    /// See [`crate::PathResult::cost`] for how parallel edges affect this.
    pub cost: f64,
}

impl RoutePlan {
    /// Number of segments in the route.
    pub fn segment_count(&self) -> usize {
        self.line_ids.len()
    }
}

/// Compute a route for `request` on `graph`.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let options = SearchOptions {
        heuristic: request.heuristic,
        deadline: request.timeout.map(|timeout| Instant::now() + timeout),
        cancel: request.cancel.clone(),
    };

    let result = find_path_with(graph, &request.start, &request.goal, &options)?;

    info!(
        start = %request.start,
        goal = %request.goal,
        heuristic = %request.heuristic,
        segments = result.line_ids.len(),
        cost = result.cost,
        expanded = result.expanded,
        "route planned"
    );

    Ok(RoutePlan {
        start: request.start.clone(),
        goal: request.goal.clone(),
        heuristic: request.heuristic,
        nodes: result.nodes,
        line_ids: result.line_ids,
        cost: result.cost,
    })
}
