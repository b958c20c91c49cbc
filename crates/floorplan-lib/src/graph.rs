use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Coordinates in the floor plan's drawing space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to `other`.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Sum of the axis-aligned offsets to `other`.
    pub fn manhattan_to(&self, other: &Position) -> f64 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }
}

/// A room, object, or corridor intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Position,
    /// Object category such as `room` or `stairs`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Node {
    /// Node without metadata.
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            kind: None,
            text: None,
        }
    }

    pub fn with_kind(mut self, kind: Option<String>) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.text = text;
        self
    }
}

/// Directed half of a walkable connection.
///
/// Each declared connection is stored twice, once per direction, with the same
/// weight and `line_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f64,
    /// Identifier of the drawable map segment this edge follows.
    pub line_id: String,
}

/// Adjacency-list graph of a single floor plan.
///
/// The graph owns every node and edge. Once built it is only read, so it can be
/// shared across threads behind an `Arc` without further synchronisation.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<String, Node>,
    adjacency: HashMap<String, Vec<Edge>>,
    connections: Vec<Edge>,
    object_ids: HashSet<String>,
    /// Object identifiers in first-declaration order.
    object_order: Vec<String>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the node `id`, returning the node it replaced.
    ///
    /// A replaced object stops being listed by [`Graph::objects`].
    pub fn add_node(&mut self, id: impl Into<String>, position: Position) -> Option<Node> {
        self.insert_node(Node::new(id, position))
    }

    /// Insert or replace a node that is not an object, such as an intersection.
    pub fn insert_node(&mut self, node: Node) -> Option<Node> {
        if self.object_ids.remove(&node.id) {
            self.object_order.retain(|id| id != &node.id);
        }
        self.nodes.insert(node.id.clone(), node)
    }

    /// Insert or replace a node and list it as a searchable object.
    pub fn add_object(&mut self, node: Node) -> Option<Node> {
        if self.object_ids.insert(node.id.clone()) {
            self.object_order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node)
    }

    /// Objects (rooms, doors, stairs, ...) in declaration order. Intersections
    /// are not included.
    pub fn objects(&self) -> impl Iterator<Item = &Node> {
        self.object_order.iter().filter_map(move |id| self.nodes.get(id))
    }

    /// Insert an undirected connection as two directed edges.
    ///
    /// Returns `false` and leaves the graph untouched when either endpoint is
    /// not a known node.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64, line_id: &str) -> bool {
        if !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
            return false;
        }

        let forward = Edge {
            from: from.to_string(),
            to: to.to_string(),
            weight,
            line_id: line_id.to_string(),
        };
        let backward = Edge {
            from: to.to_string(),
            to: from.to_string(),
            weight,
            line_id: line_id.to_string(),
        };

        self.adjacency
            .entry(from.to_string())
            .or_default()
            .push(forward.clone());
        self.adjacency
            .entry(to.to_string())
            .or_default()
            .push(backward);
        self.connections.push(forward);
        true
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Outgoing edges of `id` in insertion order.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First outgoing edge of `from` that leads to `to`.
    ///
    /// When parallel edges connect the same pair, the earliest inserted one
    /// wins.
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge> {
        self.neighbours(from).iter().find(|edge| edge.to == to)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Accepted connections in declaration order, one record per connection.
    pub fn connections(&self) -> &[Edge] {
        &self.connections
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges (twice the number of connections).
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
