//! Command-line interface for the Waypoint route optimiser.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::LevelFilter;

mod error;
mod logging;
mod optimise;

pub use error::CliError;

use optimise::{DefaultOptimiserBuilder, OptimiseArgs, run_optimise};

const ARG_REQUEST: &str = "request";
const ARG_ADDRESSES: &str = "addresses";
const ARG_ALGORITHM: &str = "algorithm";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_OSRM_PROFILE: &str = "osrm-profile";
const ARG_OFFLINE: &str = "offline";
const ARG_SUMMARY: &str = "summary";
const ARG_ROUTE_NAME: &str = "route-name";
const ARG_OUTPUT: &str = "output";
const ENV_REQUEST: &str = "WAYPOINT_CMDS_OPTIMISE_REQUEST_PATH";
const ENV_ADDRESSES: &str = "WAYPOINT_CMDS_OPTIMISE_ADDRESSES";

/// Run the Waypoint CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure encountered.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logging(cli.log_level);
    match cli.command {
        Command::Optimise(args) => run_optimise(args, &DefaultOptimiserBuilder),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waypoint",
    about = "Order delivery stops into a short closed tour",
    version
)]
struct Cli {
    /// Log verbosity (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    /// Overrides `RUST_LOG`.
    #[arg(long, global = true, value_name = "level")]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimise the visiting order of stored addresses.
    Optimise(OptimiseArgs),
}

#[cfg(test)]
mod tests;
