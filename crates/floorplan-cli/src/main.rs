use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use floorplan_cli::commands::route::{handle_route_command, RouteCommandArgs};
use floorplan_cli::commands::validate::handle_validate_command;
use floorplan_cli::commands::weights::handle_weights_command;
use floorplan_cli::output::{HeuristicArg, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Floor-plan routing utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two nodes and list its line segments.
    Route {
        /// Floor-plan JSON file.
        #[arg(long)]
        plan: PathBuf,
        /// Starting node id.
        #[arg(long = "from")]
        from: String,
        /// Destination node id.
        #[arg(long = "to")]
        to: String,
        #[arg(long, value_enum, default_value_t = HeuristicArg::Euclidean)]
        heuristic: HeuristicArg,
        /// Abort the search after this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List every accepted edge with its weight.
    Weights {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Build a floor plan and report duplicates, skipped edges and suspicious weights.
    Validate {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Route {
            plan,
            from,
            to,
            heuristic,
            timeout_ms,
            format,
        } => {
            let args = RouteCommandArgs {
                plan,
                from,
                to,
                heuristic,
                timeout_ms,
                format,
            };
            handle_route_command(&args, &mut out)?;
        }
        Command::Weights { plan, format } => handle_weights_command(&plan, format, &mut out)?,
        Command::Validate { plan, format } => handle_validate_command(&plan, format, &mut out)?,
    }

    out.flush()?;
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
