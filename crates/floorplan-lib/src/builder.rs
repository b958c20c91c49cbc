//! Graph construction from a decoded [`FloorPlan`].
//!
//! Validation policy:
//!
//! - A missing `objects` or `graph.edges` section, a node without a complete
//!   position, or an edge with a missing/empty identifier or an invalid weight
//!   aborts the whole build with [`Error::Schema`].
//! - A node identifier declared twice keeps the last declaration. Objects are
//!   inserted before intersections, so an intersection overrides an object with
//!   the same id.
//! - An edge whose endpoint is not a declared node is skipped; the rest of the
//!   floor plan still loads.
//!
//! Every overwrite and skip is logged and listed in the [`BuildReport`].

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::graph::{Graph, Node, Position};
use crate::schema::{load_floor_plan, EdgeEntry, FloorPlan, NodeTable};

/// Tolerance used when checking weights against straight-line distance.
const ADMISSIBILITY_EPSILON: f64 = 1e-9;

const OBJECTS: &str = "objects";
const INTERSECTIONS: &str = "intersections";

/// Summary of a graph build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    pub nodes: usize,
    pub connections: usize,
    /// Identifiers declared more than once, in the order the overwrite happened.
    pub duplicate_nodes: Vec<String>,
    pub skipped_edges: Vec<SkippedEdge>,
    /// Indices of edges lighter than the straight-line distance between their
    /// endpoints. The Euclidean heuristic may return sub-optimal routes when
    /// this list is not empty.
    pub inadmissible_edges: Vec<usize>,
}

/// An edge dropped because an endpoint does not exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEdge {
    /// Position of the edge in `graph.edges`.
    pub index: usize,
    pub from: String,
    pub to: String,
    pub line_id: String,
}

/// Build the routing graph, discarding the build report.
pub fn build_graph(plan: &FloorPlan) -> Result<Graph> {
    build_graph_with_report(plan).map(|(graph, _)| graph)
}

/// Build the routing graph and report the policy decisions taken.
pub fn build_graph_with_report(plan: &FloorPlan) -> Result<(Graph, BuildReport)> {
    let mut graph = Graph::new();
    let mut report = BuildReport::default();

    let objects = plan
        .objects
        .as_ref()
        .ok_or_else(|| Error::schema("objects", "section is required"))?;
    insert_nodes(&mut graph, &mut report, OBJECTS, objects)?;
    if let Some(intersections) = &plan.intersections {
        insert_nodes(&mut graph, &mut report, INTERSECTIONS, intersections)?;
    }

    let edges = plan
        .graph
        .as_ref()
        .ok_or_else(|| Error::schema("graph", "section is required"))?
        .edges
        .as_ref()
        .ok_or_else(|| Error::schema("graph.edges", "list is required"))?;

    for (index, entry) in edges.iter().enumerate() {
        let edge = validate_edge(index, entry)?;

        if !graph.add_edge(edge.from, edge.to, edge.weight, edge.line_id) {
            warn!(
                index,
                from = edge.from,
                to = edge.to,
                line_id = edge.line_id,
                "skipping edge with unknown endpoint"
            );
            report.skipped_edges.push(SkippedEdge {
                index,
                from: edge.from.to_string(),
                to: edge.to.to_string(),
                line_id: edge.line_id.to_string(),
            });
            continue;
        }

        if let (Some(a), Some(b)) = (graph.node(edge.from), graph.node(edge.to)) {
            let straight = a.position.distance_to(&b.position);
            if edge.weight + ADMISSIBILITY_EPSILON < straight {
                report.inadmissible_edges.push(index);
            }
        }
        report.connections += 1;
    }

    report.nodes = graph.node_count();

    if !report.inadmissible_edges.is_empty() {
        warn!(
            count = report.inadmissible_edges.len(),
            "edge weights below straight-line distance; euclidean routes may be sub-optimal"
        );
    }
    info!(
        nodes = report.nodes,
        connections = report.connections,
        duplicate_nodes = report.duplicate_nodes.len(),
        skipped_edges = report.skipped_edges.len(),
        "floor plan graph built"
    );

    Ok((graph, report))
}

/// Load a floor-plan file and build its graph.
pub fn load_graph(path: &Path) -> Result<(Graph, BuildReport)> {
    let plan = load_floor_plan(path)?;
    build_graph_with_report(&plan)
}

fn insert_nodes(
    graph: &mut Graph,
    report: &mut BuildReport,
    section: &str,
    table: &NodeTable,
) -> Result<()> {
    for (id, entry) in table.iter() {
        let field = format!("{section}.{id}.position");
        let position = entry
            .position
            .ok_or_else(|| Error::schema(&field, "position is required"))?;
        let x = position
            .x
            .ok_or_else(|| Error::schema(format!("{field}.x"), "coordinate is required"))?;
        let y = position
            .y
            .ok_or_else(|| Error::schema(format!("{field}.y"), "coordinate is required"))?;

        let node = Node::new(id, Position::new(x, y))
            .with_kind(entry.kind.clone())
            .with_text(entry.text.clone());
        let replaced = if section == OBJECTS {
            graph.add_object(node)
        } else {
            graph.insert_node(node)
        };
        if replaced.is_some() {
            warn!(id, section, "duplicate node identifier overwrites earlier entry");
            report.duplicate_nodes.push(id.to_string());
        }
    }
    Ok(())
}

struct ValidEdge<'a> {
    from: &'a str,
    to: &'a str,
    weight: f64,
    line_id: &'a str,
}

fn validate_edge(index: usize, entry: &EdgeEntry) -> Result<ValidEdge<'_>> {
    let field = |name: &str| format!("graph.edges[{index}].{name}");

    let from = required_id(entry.from.as_deref(), || field("from"))?;
    let to = required_id(entry.to.as_deref(), || field("to"))?;
    let line_id = required_id(entry.line_id.as_deref(), || field("line_id"))?;

    let weight = entry
        .weight
        .ok_or_else(|| Error::schema(field("weight"), "weight is required"))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::schema(
            field("weight"),
            format!("weight must be a finite non-negative number, got {weight}"),
        ));
    }

    Ok(ValidEdge {
        from,
        to,
        weight,
        line_id,
    })
}

fn required_id<'a>(value: Option<&'a str>, field: impl Fn() -> String) -> Result<&'a str> {
    match value {
        Some(id) if !id.trim().is_empty() => Ok(id),
        Some(_) => Err(Error::schema(field(), "identifier must not be empty")),
        None => Err(Error::schema(field(), "identifier is required")),
    }
}
