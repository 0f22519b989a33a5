//! tilecal CLI - Command-line interface
//!
//! Computes WMTS tile sequences and mosaic calibration for an area given by
//! two projected corners.

mod commands;
mod error;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::{estimate, levels, providers, sequence};
use error::CliError;

#[derive(Parser)]
#[command(name = "tilecal")]
#[command(about = "WMTS tile sequences and calibration from two projected corners", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the tile sequence and calibration at one zoom level
    Sequence(sequence::SequenceArgs),

    /// Count the tiles needed over a range of zoom levels
    Estimate(estimate::EstimateArgs),

    /// List the built-in tile matrices
    Providers,

    /// Show the resolution and tile span of every level of a matrix
    Levels(levels::LevelsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Sequence(args) => sequence::run(args),
        Commands::Estimate(args) => estimate::run(args),
        Commands::Providers => providers::run(),
        Commands::Levels(args) => levels::run(args),
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so that stdout only carries command output.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tilecal=debug,tilecal_cli=debug"
    } else {
        "tilecal=info,tilecal_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
