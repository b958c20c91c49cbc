//! `route` subcommand: shortest route between two nodes of a floor plan.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use floorplan_lib::{plan_route, RouteRequest};

use crate::commands::load_plan;
use crate::output::{render_route_text, write_json, HeuristicArg, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub plan: PathBuf,
    pub from: String,
    pub to: String,
    pub heuristic: HeuristicArg,
    /// Abort the search after this many milliseconds.
    pub timeout_ms: Option<u64>,
    pub format: OutputFormat,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(&self.from, &self.to).with_heuristic(self.heuristic.into());
        match self.timeout_ms {
            Some(ms) => request.with_timeout(Duration::from_millis(ms)),
            None => request,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command<W: Write>(args: &RouteCommandArgs, out: &mut W) -> Result<()> {
    let (graph, _) = load_plan(&args.plan)?;

    let plan = plan_route(&graph, &args.to_request())
        .with_context(|| format!("failed to route from '{}' to '{}'", args.from, args.to))?;

    match args.format {
        OutputFormat::Text => render_route_text(out, &plan)?,
        OutputFormat::Json => write_json(out, &plan)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_lib::Heuristic;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/floor_plan.json")
    }

    fn args(from: &str, to: &str) -> RouteCommandArgs {
        RouteCommandArgs {
            plan: fixture(),
            from: from.to_string(),
            to: to.to_string(),
            heuristic: HeuristicArg::Euclidean,
            timeout_ms: None,
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn to_request_carries_options() {
        let mut route_args = args("entrance", "stairs");
        route_args.heuristic = HeuristicArg::Manhattan;
        route_args.timeout_ms = Some(250);

        let request = route_args.to_request();
        assert_eq!(request.start, "entrance");
        assert_eq!(request.goal, "stairs");
        assert_eq!(request.heuristic, Heuristic::Manhattan);
        assert_eq!(request.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn json_route_for_fixture() {
        let mut out = Vec::new();
        handle_route_command(&args("entrance", "room-103"), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value["line_ids"],
            serde_json::json!(["line-1", "line-3", "line-5", "line-6"])
        );
        assert_eq!(value["cost"], 50.0);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let mut out = Vec::new();
        let err = handle_route_command(&args("entrance", "room-999"), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("unknown node: room-999"));
        assert!(out.is_empty());
    }
}
