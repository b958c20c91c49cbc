//! Typed representation of the floor-plan JSON document.
//!
//! The document is decoded leniently: every field the builder validates is an
//! `Option` here so that a missing value surfaces as a [`Error::Schema`] naming
//! the exact field instead of a generic decode failure. Node tables keep their
//! declaration order and any duplicate identifiers so the builder can apply
//! (and report) its last-write-wins policy.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Root of a floor-plan document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    /// Rooms and other named objects, keyed by node identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<NodeTable>,

    /// Corridor intersections, keyed by node identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersections: Option<NodeTable>,

    /// Weighted connections between nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphSection>,
}

impl FloorPlan {
    /// Decode a floor plan from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a floor plan from any reader producing JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Load and decode a floor-plan file.
pub fn load_floor_plan(path: &Path) -> Result<FloorPlan> {
    if !path.exists() {
        return Err(Error::FloorPlanNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let plan = FloorPlan::from_reader(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), "decoded floor plan document");
    Ok(plan)
}

/// Ordered `id -> entry` table that preserves duplicate keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTable {
    entries: Vec<(String, NodeEntry)>,
}

impl NodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; an existing entry with the same id is kept.
    pub fn push(&mut self, id: impl Into<String>, entry: NodeEntry) {
        self.entries.push((id.into(), entry));
    }

    /// Entries in declaration order, duplicates included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Number of declared entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table declares no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, NodeEntry)> for NodeTable {
    fn from_iter<I: IntoIterator<Item = (String, NodeEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for NodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, entry) in &self.entries {
            map.serialize_entry(id, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NodeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct NodeTableVisitor;

        impl<'de> Visitor<'de> for NodeTableVisitor {
            type Value = NodeTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of node identifiers to node entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, entry)) = access.next_entry::<String, NodeEntry>()? {
                    entries.push((id, entry));
                }
                Ok(NodeTable { entries })
            }
        }

        deserializer.deserialize_map(NodeTableVisitor)
    }
}

/// A declared object or intersection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionEntry>,

    /// Object category (room, stairs, ...). Informational only.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Display label. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl NodeEntry {
    /// Entry positioned at `(x, y)` with no metadata.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Some(PositionEntry {
                x: Some(x),
                y: Some(y),
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionEntry {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// The `graph` section of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<EdgeEntry>>,
}

/// One undirected connection as declared in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeEntry {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub line_id: Option<String>,
}

impl EdgeEntry {
    /// Fully populated edge entry.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        weight: f64,
        line_id: impl Into<String>,
    ) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            weight: Some(weight),
            line_id: Some(line_id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_document_with_metadata() {
        let plan = FloorPlan::from_json_str(
            r#"{
                "objects": {
                    "room-101": {"position": {"x": 1.5, "y": 2}, "type": "room", "text": "101"}
                },
                "intersections": {"i1": {"position": {"x": 0, "y": 0}}},
                "graph": {"edges": [{"from": "room-101", "to": "i1", "weight": 2.5, "line_id": "L1"}]}
            }"#,
        )
        .unwrap();

        let objects = plan.objects.as_ref().unwrap();
        let (id, entry) = objects.iter().next().unwrap();
        assert_eq!(id, "room-101");
        assert_eq!(entry.kind.as_deref(), Some("room"));
        assert_eq!(entry.position.unwrap().y, Some(2.0));

        let edges = plan.graph.unwrap().edges.unwrap();
        assert_eq!(edges[0], EdgeEntry::new("room-101", "i1", 2.5, "L1"));
    }

    #[test]
    fn node_table_keeps_duplicates_in_order() {
        let plan = FloorPlan::from_json_str(
            r#"{"objects": {
                "a": {"position": {"x": 1, "y": 1}},
                "b": {"position": {"x": 2, "y": 2}},
                "a": {"position": {"x": 3, "y": 3}}
            }}"#,
        )
        .unwrap();

        let ids: Vec<_> = plan.objects.unwrap().iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["a", "b", "a"]);
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let plan = FloorPlan::from_json_str(r#"{"graph": {"edges": [{"from": "a"}]}}"#).unwrap();
        assert!(plan.objects.is_none());
        let edge = &plan.graph.unwrap().edges.unwrap()[0];
        assert!(edge.weight.is_none());
        assert!(edge.line_id.is_none());
    }

    #[test]
    fn wrong_value_type_is_schema_error() {
        let err = FloorPlan::from_json_str(r#"{"graph": {"edges": [{"weight": "five"}]}}"#)
            .unwrap_err();
        match err {
            Error::Schema { field, message } => {
                assert!(field.starts_with("document"));
                assert!(message.contains("invalid type"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_floor_plan(Path::new("/nonexistent/floor_plan.json")).unwrap_err();
        assert!(matches!(err, Error::FloorPlanNotFound { .. }));
    }
}
