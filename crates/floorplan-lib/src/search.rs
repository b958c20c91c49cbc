//! A* route search over a floor-plan [`Graph`].
//!
//! The open set is a [`Frontier`] without decrease-key. Improving a node's
//! g-score pushes a fresh [`SearchRecord`]; when an older record for the same
//! node is extracted later its g-score no longer matches the best known score
//! and it is skipped.
//!
//! With the default [`Heuristic::Euclidean`] the result is optimal as long as
//! every edge weight is at least the straight-line distance between its
//! endpoints. [`crate::BuildReport::inadmissible_edges`] lists edges that break
//! this.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::graph::{Graph, Node, Position};
use crate::reconstruct::{node_path, reconstruct};

/// Estimate of the remaining cost to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Axis-aligned distance. Only admissible when corridors are axis-aligned
    /// and weights are measured along them.
    Manhattan,
    /// No estimate; the search degenerates to Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: &Position, goal: &Position) -> f64 {
        match self {
            Heuristic::Euclidean => from.distance_to(goal),
            Heuristic::Manhattan => from.manhattan_to(goal),
            Heuristic::Zero => 0.0,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Heuristic::Euclidean => "euclidean",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Zero => "zero",
        };
        f.write_str(value)
    }
}

/// Shared flag a caller can raise to abort an in-flight search.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs for a single search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub heuristic: Heuristic,
    /// Abort with [`Error::SearchTimedOut`] once this instant has passed.
    pub deadline: Option<Instant>,
    /// Abort with [`Error::SearchCancelled`] once raised.
    pub cancel: Option<CancelFlag>,
}

impl SearchOptions {
    fn check(&self, started: Instant) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(Error::SearchCancelled);
        }
        if let Some(deadline) = self.deadline {
            let now = Instant::now();
            if now >= deadline {
                return Err(Error::SearchTimedOut {
                    elapsed_ms: now.duration_since(started).as_millis(),
                });
            }
        }
        Ok(())
    }
}

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Node identifiers from start to goal, both included.
    pub nodes: Vec<String>,
    /// Segment identifiers to highlight, one per hop.
    pub line_ids: Vec<String>,
    /// Best g-score of the goal, i.e. the cost of the cheapest route.
    ///
    /// When two nodes are joined by parallel edges the search relaxes through
    /// the cheapest one, while `line_ids` names the first declared edge of each
    /// pair. In that case this cost can differ from the sum of the weights of
    /// the listed segments.
    pub cost: f64,
    /// Number of nodes expanded by the search.
    pub expanded: usize,
}

/// One discovered way of reaching `node`.
#[derive(Debug, Clone, Copy)]
pub struct SearchRecord<'g> {
    pub node: &'g Node,
    /// Index of the record this one was reached from.
    pub parent: Option<usize>,
    pub g_score: f64,
    pub f_score: f64,
}

/// Arena owning every record created during one search.
///
/// Records refer to their parent by index, so the parent chain of any record
/// stays valid for as long as the trail lives.
#[derive(Debug, Default)]
pub struct SearchTrail<'g> {
    records: Vec<SearchRecord<'g>>,
}

impl<'g> SearchTrail<'g> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: SearchRecord<'g>) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&SearchRecord<'g>> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Find the lowest-cost route using the Euclidean heuristic and no limits.
pub fn find_path(graph: &Graph, start: &str, goal: &str) -> Result<PathResult> {
    find_path_with(graph, start, goal, &SearchOptions::default())
}

/// Find the lowest-cost route from `start` to `goal`.
pub fn find_path_with(
    graph: &Graph,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Result<PathResult> {
    let start_node = graph.node(start).ok_or_else(|| Error::NodeNotFound {
        id: start.to_string(),
    })?;
    let goal_node = graph.node(goal).ok_or_else(|| Error::NodeNotFound {
        id: goal.to_string(),
    })?;

    let started = Instant::now();
    let mut trail = SearchTrail::new();
    let mut frontier = Frontier::new();
    let mut g_score: HashMap<&str, f64> = HashMap::new();

    let start_estimate = options
        .heuristic
        .estimate(&start_node.position, &goal_node.position);
    let root = trail.push(SearchRecord {
        node: start_node,
        parent: None,
        g_score: 0.0,
        f_score: start_estimate,
    });
    g_score.insert(start_node.id.as_str(), 0.0);
    frontier.insert(root, start_estimate);

    let mut expanded = 0;
    while let Some((index, _)) = frontier.extract_min() {
        options.check(started)?;

        let Some(&current) = trail.get(index) else {
            continue;
        };
        let best = g_score
            .get(current.node.id.as_str())
            .copied()
            .unwrap_or(f64::INFINITY);
        if current.g_score > best {
            continue;
        }

        if current.node.id == goal_node.id {
            let nodes = node_path(&trail, index);
            let line_ids = reconstruct(&trail, index, graph)?;
            debug!(
                start,
                goal,
                expanded,
                cost = current.g_score,
                segments = line_ids.len(),
                "route found"
            );
            return Ok(PathResult {
                nodes,
                line_ids,
                cost: current.g_score,
                expanded,
            });
        }
        expanded += 1;

        for edge in graph.neighbours(&current.node.id) {
            let tentative = current.g_score + edge.weight;
            let known = g_score
                .get(edge.to.as_str())
                .copied()
                .unwrap_or(f64::INFINITY);
            if tentative >= known {
                continue;
            }
            let Some(neighbour) = graph.node(&edge.to) else {
                continue;
            };

            let f_score = tentative
                + options
                    .heuristic
                    .estimate(&neighbour.position, &goal_node.position);
            g_score.insert(neighbour.id.as_str(), tentative);
            let child = trail.push(SearchRecord {
                node: neighbour,
                parent: Some(index),
                g_score: tentative,
                f_score,
            });
            frontier.insert(child, f_score);
        }
    }

    debug!(start, goal, expanded, "frontier exhausted without reaching goal");
    Err(Error::PathNotFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })
}
