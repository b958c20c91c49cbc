//! Floor-plan routing library entry points.
//!
//! This crate decodes floor-plan documents, builds the routing graph, and runs
//! the A* search that answers "how do I get from A to B inside this building"
//! queries. The answer is the ordered list of line identifiers (map segments)
//! to highlight. Higher-level consumers (CLI, HTTP service) should only depend
//! on the functions exported here instead of reimplementing behavior.
//!

pub mod builder;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod reconstruct;
pub mod routing;
pub mod schema;
pub mod search;
pub mod store;

pub use builder::{build_graph, build_graph_with_report, load_graph, BuildReport, SkippedEdge};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, Node, Position};
pub use routing::{plan_route, RoutePlan, RouteRequest};
pub use schema::{load_floor_plan, FloorPlan};
pub use search::{find_path, find_path_with, CancelFlag, Heuristic, PathResult, SearchOptions};
pub use store::GraphStore;
