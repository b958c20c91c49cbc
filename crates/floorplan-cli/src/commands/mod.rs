// One module per subcommand. main.rs parses arguments and dispatches here.

use std::path::Path;

use anyhow::{Context, Result};

use floorplan_lib::{load_graph, BuildReport, Graph};

pub mod route;
pub mod validate;
pub mod weights;

fn load_plan(path: &Path) -> Result<(Graph, BuildReport)> {
    load_graph(path).with_context(|| format!("failed to load floor plan from {}", path.display()))
}
