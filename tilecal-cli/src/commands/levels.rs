//! Levels command - per-level resolution and tile span of a matrix.

use clap::Args;

use super::common::{resolve_matrix, MatrixArgs};
use crate::error::CliError;

/// Arguments for the levels command.
#[derive(Debug, Args)]
pub struct LevelsArgs {
    #[command(flatten)]
    pub matrix: MatrixArgs,
}

/// Run the levels command.
pub fn run(args: LevelsArgs) -> Result<(), CliError> {
    let resolved = resolve_matrix(&args.matrix)?;
    let matrix = &resolved.matrix;

    println!("Tile Matrix: {}", resolved.name);
    println!();
    println!("  Origin:    {}, {}", matrix.origin().x, matrix.origin().y);
    println!("  Tile size: {} px", matrix.tile_size());
    if let Some(extent) = matrix.extent() {
        println!(
            "  Extent:    {}, {} .. {}, {}",
            extent.x_min, extent.y_min, extent.x_max, extent.y_max
        );
    }
    println!();
    println!("  {:>4}  {:>20}  {:>20}", "Zoom", "Units/px", "Tile span");
    for entry in matrix.levels() {
        println!(
            "  {:>4}  {:>20.10}  {:>20.4}",
            entry.zoom,
            entry.resolution,
            entry.tile_span()
        );
    }

    Ok(())
}
