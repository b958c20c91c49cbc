//! Turn a search record's parent chain into the route the caller sees.

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::search::SearchTrail;

/// Node identifiers from the root of the trail to `terminal`, in travel order.
pub fn node_path(trail: &SearchTrail<'_>, terminal: usize) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = Some(terminal);
    while let Some(index) = current {
        let Some(record) = trail.get(index) else {
            break;
        };
        path.push(record.node.id.clone());
        current = record.parent;
    }
    path.reverse();
    path
}

/// Segment identifiers along the path ending at `terminal`.
///
/// Each hop uses the first outgoing edge (in insertion order) that connects
/// the pair, so parallel edges always resolve to the earliest declared one,
/// even when a later parallel edge is the one the search relaxed through.
/// A single-node path yields no segments.
pub fn reconstruct(trail: &SearchTrail<'_>, terminal: usize, graph: &Graph) -> Result<Vec<String>> {
    let path = node_path(trail, terminal);
    segments_for(&path, graph)
}

/// Segment identifiers for an explicit node path.
pub fn segments_for(path: &[String], graph: &Graph) -> Result<Vec<String>> {
    path.windows(2)
        .map(|pair| {
            graph
                .edge_between(&pair[0], &pair[1])
                .map(|edge| edge.line_id.clone())
                .ok_or_else(|| Error::MissingSegment {
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                })
        })
        .collect()
}
