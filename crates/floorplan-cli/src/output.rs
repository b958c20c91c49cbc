//! Output formatting for CLI commands.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use floorplan_lib::{BuildReport, Edge, Heuristic, RoutePlan};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Heuristic selected with `--heuristic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HeuristicArg {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Axis-aligned distance; only safe for axis-aligned corridors.
    Manhattan,
    /// No estimate (Dijkstra).
    Zero,
}

impl From<HeuristicArg> for Heuristic {
    fn from(value: HeuristicArg) -> Self {
        match value {
            HeuristicArg::Euclidean => Heuristic::Euclidean,
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Zero => Heuristic::Zero,
        }
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Render a planned route, one segment per line.
pub fn render_route_text<W: Write>(out: &mut W, plan: &RoutePlan) -> io::Result<()> {
    writeln!(
        out,
        "Route from {} to {} ({} segments; cost {:.2}; heuristic: {}):",
        plan.start,
        plan.goal,
        plan.segment_count(),
        plan.cost,
        plan.heuristic
    )?;

    if plan.line_ids.is_empty() {
        writeln!(out, "  already at destination")?;
        return Ok(());
    }

    for (index, (line_id, hop)) in plan.line_ids.iter().zip(plan.nodes.windows(2)).enumerate() {
        writeln!(out, "{:>3}. {}  {} -> {}", index + 1, line_id, hop[0], hop[1])?;
    }
    Ok(())
}

/// Render accepted edges, tab separated.
pub fn render_weights_text<W: Write>(out: &mut W, edges: &[Edge]) -> io::Result<()> {
    for edge in edges {
        writeln!(out, "{}\t{}\t{}\t{}", edge.line_id, edge.from, edge.to, edge.weight)?;
    }
    Ok(())
}

/// Render a build report.
pub fn render_report_text<W: Write>(out: &mut W, report: &BuildReport) -> io::Result<()> {
    writeln!(
        out,
        "Floor plan OK: {} nodes, {} connections",
        report.nodes, report.connections
    )?;

    if report.duplicate_nodes.is_empty() {
        writeln!(out, "Duplicate node ids: none")?;
    } else {
        writeln!(
            out,
            "Duplicate node ids: {}",
            report.duplicate_nodes.join(", ")
        )?;
    }

    writeln!(out, "Skipped edges: {}", report.skipped_edges.len())?;
    for skipped in &report.skipped_edges {
        writeln!(
            out,
            "  - graph.edges[{}] {}: {} -> {} (unknown endpoint)",
            skipped.index, skipped.line_id, skipped.from, skipped.to
        )?;
    }

    if report.inadmissible_edges.is_empty() {
        writeln!(out, "Inadmissible weights: none")?;
    } else {
        let indices: Vec<String> = report
            .inadmissible_edges
            .iter()
            .map(|index| format!("graph.edges[{index}]"))
            .collect();
        writeln!(
            out,
            "Inadmissible weights: {} (shorter than straight-line distance)",
            indices.join(", ")
        )?;
    }
    Ok(())
}
