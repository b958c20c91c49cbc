//! `validate` subcommand: build a floor plan and report what the builder did.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::commands::load_plan;
use crate::output::{render_report_text, write_json, OutputFormat};

/// Handle the validate subcommand.
///
/// Schema errors are returned as errors; skipped edges, duplicate ids and
/// inadmissible weights are reported but do not fail the command.
pub fn handle_validate_command<W: Write>(
    plan: &Path,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let (_, report) = load_plan(plan)?;

    match format {
        OutputFormat::Text => render_report_text(out, &report)?,
        OutputFormat::Json => write_json(out, &report)?,
    }
    Ok(())
}
