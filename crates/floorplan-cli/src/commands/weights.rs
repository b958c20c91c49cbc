//! `weights` subcommand: list the accepted edges of a floor plan.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use floorplan_lib::Edge;

use crate::commands::load_plan;
use crate::output::{render_weights_text, write_json, OutputFormat};

#[derive(Debug, Serialize)]
struct WeightsOutput<'a> {
    edges: &'a [Edge],
}

/// Handle the weights subcommand.
pub fn handle_weights_command<W: Write>(
    plan: &Path,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let (graph, _) = load_plan(plan)?;
    let edges = graph.connections();

    match format {
        OutputFormat::Text => render_weights_text(out, edges)?,
        OutputFormat::Json => write_json(out, &WeightsOutput { edges })?,
    }
    Ok(())
}
